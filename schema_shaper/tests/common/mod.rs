//! Shared fixtures for integration tests
#![allow(dead_code)]

use schema_shaper::schema::types::{Column, Entity, Index, Multiplicity, Relation, SchemaModel};

fn owning(owner: &str, inverse: &str, related: &str) -> Relation {
    Relation::new((owner, inverse), (related, "id"), true, Multiplicity::ManyToOne)
}

fn inverse(owner: &str, foreign_key: &str) -> Relation {
    Relation::new((owner, foreign_key), (owner, foreign_key), false, Multiplicity::OneToMany)
}

/// Three entities: `book` references `author` twice, `genre` references itself
pub fn library() -> SchemaModel {
    SchemaModel::new()
        .with_entity(
            Entity::new("author")
                .with_column(Column::new("id", "number", "int").primary())
                .with_column(Column::new("name", "string", "varchar").length(255))
                .with_column(Column::new("bio", "string", "text").nullable(true))
                .with_column(Column::new("books", "number", "int").relation(inverse("book", "author_id")))
                .with_column(
                    Column::new("edited_books", "number", "int").relation(inverse("book", "editor_id")),
                )
                .with_index(Index::new("PK_author", &["id"]).primary()),
        )
        .with_entity(
            Entity::new("book")
                .with_column(Column::new("id", "number", "int").primary())
                .with_column(Column::new("title", "string", "varchar").length(500))
                .with_column(Column::new("published_on", "date", "date"))
                .with_column(Column::new("created_at", "Date", "datetime"))
                .with_column(Column::new("price", "number", "decimal").precision(10).scale(0))
                .with_column(
                    Column::new("author_id", "number", "int").relation(owning("book", "books", "author")),
                )
                .with_column(
                    Column::new("editor_id", "number", "int")
                        .nullable(true)
                        .relation(owning("book", "edited_books", "author")),
                )
                .with_index(Index::new("PK_book", &["id"]).primary())
                .with_index(Index::new("IX_book_author", &["author_id", "editor_id"])),
        )
        .with_entity(
            Entity::new("genre")
                .with_column(Column::new("id", "number", "int").primary())
                .with_column(
                    Column::new("parent_id", "number", "int")
                        .nullable(true)
                        .relation(owning("genre", "children", "genre")),
                )
                .with_column(Column::new("children", "number", "int").relation(inverse("genre", "parent_id")))
                .with_index(Index::new("IX_genre_parent", &["parent_id"])),
        )
}

/// Every ordering of `items`
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }

    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}

/// Order-independent form of a model, for comparing runs
pub fn normalized(mut model: SchemaModel) -> SchemaModel {
    model.entities.sort_by(|a, b| a.name.cmp(&b.name));
    for entity in &mut model.entities {
        entity.columns.sort_by(|a, b| a.sql_name.cmp(&b.sql_name));
        entity.imports.sort();
    }
    model
}
