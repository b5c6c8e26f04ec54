//! Process-local store. Same contract as the Postgres store; contents die with the process.

use super::{StudentStore, NOT_FOUND_MESSAGE};
use crate::error::StoreError;
use crate::model::{Student, StudentInput};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
pub struct MemoryStudentStore {
    table: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    /// Highest id ever handed out; only grows, so deleted ids are never reused.
    last_id: i32,
    rows: BTreeMap<i32, Student>,
    closed: bool,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StoreError> {
        let table = self
            .table
            .read()
            .map_err(|_| StoreError::Store("memory store lock poisoned".into()))?;
        if table.closed {
            return Err(StoreError::Store("store is closed".into()));
        }
        Ok(table)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, StoreError> {
        let table = self
            .table
            .write()
            .map_err(|_| StoreError::Store("memory store lock poisoned".into()))?;
        if table.closed {
            return Err(StoreError::Store("store is closed".into()));
        }
        Ok(table)
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Student, StoreError> {
        self.read()?
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(NOT_FOUND_MESSAGE.into()))
    }

    async fn create(&self, input: StudentInput) -> Result<Student, StoreError> {
        let mut table = self.write()?;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Store("student id space exhausted".into()))?;
        table.last_id = id;
        let student = input.into_student(id);
        table.rows.insert(id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: i32, input: StudentInput) -> Result<Student, StoreError> {
        let mut table = self.write()?;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(NOT_FOUND_MESSAGE.into()))?;
        *row = input.into_student(id);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        self.write()?
            .rows
            .remove(&id)
            .map(drop)
            .ok_or_else(|| StoreError::NotFound(NOT_FOUND_MESSAGE.into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(drop)
    }

    async fn close(&self) {
        if let Ok(mut table) = self.table.write() {
            table.closed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, age: i32) -> StudentInput {
        StudentInput {
            name: name.into(),
            email: format!("{}@x.com", name.to_lowercase()),
            age,
        }
    }

    #[tokio::test]
    async fn ids_grow_and_are_not_reused_after_delete() {
        let store = MemoryStudentStore::new();
        let a = store.create(input("Ana", 20)).await.unwrap();
        let b = store.create(input("Bo", 22)).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(b.id).await.unwrap();
        let c = store.create(input("Cy", 19)).await.unwrap();
        assert_eq!(c.id, 3);

        let ids: Vec<i32> = store.list().await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let store = MemoryStudentStore::new();
        let a = store.create(input("Ana", 20)).await.unwrap();
        let updated = store.update(a.id, input("Ana", 21)).await.unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.age, 21);
        assert_eq!(store.get(a.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryStudentStore::new();
        let expected = StoreError::NotFound(NOT_FOUND_MESSAGE.into());
        assert_eq!(store.get(7).await.unwrap_err(), expected);
        assert_eq!(store.update(7, input("Ana", 20)).await.unwrap_err(), expected);
        assert_eq!(store.delete(7).await.unwrap_err(), expected);
    }

    #[tokio::test]
    async fn closed_store_refuses_calls() {
        let store = MemoryStudentStore::new();
        store.ping().await.unwrap();
        store.close().await;
        assert!(matches!(store.ping().await, Err(StoreError::Store(_))));
        assert!(matches!(store.list().await, Err(StoreError::Store(_))));
    }
}
