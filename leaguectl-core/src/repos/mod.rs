//! Query/mutation contract: one repository per entity
//!
//! Each repository borrows the store handle and follows the same rules:
//! - inputs are validated before any store call
//! - every read goes to the store; nothing is cached between calls
//! - update is full replace: every input column is written
//! - store failures surface as [`DataError::Store`] with the raw message

pub mod matches;
pub mod news;
pub mod players;
pub mod shop;
pub mod stats;
pub mod teams;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{DataError, DataResult};
use crate::models::{Entity, EntityInput};
use crate::store::{Row, Select, Store, StoreError};

pub use matches::MatchRepo;
pub use news::NewsRepo;
pub use players::PlayerRepo;
pub use shop::{ShopCategoryRepo, ShopItemRepo};
pub use stats::Stats;
pub use teams::TeamRepo;

/// Create/update/delete for one entity kind.
///
/// Not idempotent: calling `create` twice with the same input stores two
/// records with different ids.
#[async_trait]
pub trait Mutations: Send + Sync {
    type Input: Send + Sync;
    type Record: Send;

    async fn create(&self, input: &Self::Input) -> DataResult<Self::Record>;

    async fn update(&self, id: Uuid, input: &Self::Input) -> DataResult<Self::Record>;

    async fn delete(&self, id: Uuid) -> DataResult<()>;
}

/// Serialize a normalized input into a row.
pub(crate) fn to_row<T: Serialize>(value: &T) -> DataResult<Row> {
    match serde_json::to_value(value) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(StoreError::new(format!("expected an object row, got {}", other)).into()),
        Err(e) => Err(StoreError::new(e.to_string()).into()),
    }
}

pub(crate) fn from_row<E: Entity>(row: Row) -> DataResult<E> {
    serde_json::from_value(Value::Object(row)).map_err(|e| DataError::malformed(E::RESOURCE, e))
}

pub(crate) async fn fetch_all<E: Entity>(store: &dyn Store, query: &Select) -> DataResult<Vec<E>> {
    store
        .select(query)
        .await?
        .into_iter()
        .map(from_row::<E>)
        .collect()
}

pub(crate) async fn fetch_one<E: Entity>(store: &dyn Store, id: Uuid) -> DataResult<E> {
    let row = store
        .select(&Select::from(E::TABLE).by_id(id).limit(1))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DataError::not_found(E::RESOURCE, id))?;
    from_row(row)
}

/// Validate, normalize and insert.
pub(crate) async fn insert<E: Entity, I: EntityInput>(store: &dyn Store, input: &I) -> DataResult<E> {
    input.validate()?;
    insert_row(store, to_row(&input.normalized())?).await
}

pub(crate) async fn insert_row<E: Entity>(store: &dyn Store, row: Row) -> DataResult<E> {
    let created = store.insert(E::TABLE, row).await?;
    let record: E = from_row(created)?;
    tracing::info!(table = %E::TABLE, id = %record.id(), "created");
    Ok(record)
}

/// Validate, normalize and overwrite row `id`.
pub(crate) async fn replace<E: Entity, I: EntityInput>(
    store: &dyn Store,
    id: Uuid,
    input: &I,
) -> DataResult<E> {
    input.validate()?;
    replace_row(store, id, to_row(&input.normalized())?).await
}

pub(crate) async fn replace_row<E: Entity>(store: &dyn Store, id: Uuid, row: Row) -> DataResult<E> {
    let updated = store
        .update(E::TABLE, id, row)
        .await?
        .ok_or_else(|| DataError::not_found(E::RESOURCE, id))?;
    tracing::info!(table = %E::TABLE, %id, "updated");
    from_row(updated)
}

pub(crate) async fn remove<E: Entity>(store: &dyn Store, id: Uuid) -> DataResult<()> {
    if !store.delete(E::TABLE, id).await? {
        return Err(DataError::not_found(E::RESOURCE, id));
    }
    tracing::info!(table = %E::TABLE, %id, "deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Team, TeamInput};
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn invalid_input_never_reaches_store() {
        let store = MemoryStore::new();
        let err = insert::<Team, _>(&store, &TeamInput::default()).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        let err = fetch_one::<Team>(&store, id).await.unwrap_err();
        assert_eq!(err, DataError::not_found("team", id));

        let err = replace::<Team, _>(&store, id, &TeamInput::named("x")).await.unwrap_err();
        assert!(err.is_not_found());

        let err = remove::<Team>(&store, id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn undecodable_rows_are_store_errors() {
        let store = MemoryStore::new();
        let mut row = Row::new();
        row.insert("name".into(), Value::from(42));
        let err = insert_row::<Team>(&store, row).await.unwrap_err();
        assert!(matches!(err, DataError::Store(_)));
        assert!(err.to_string().starts_with("malformed team row"));
    }
}
