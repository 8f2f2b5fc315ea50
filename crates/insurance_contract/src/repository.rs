//! Typed access to the ledger store

use core_kernel::{LedgerEntity, LedgerStore, PortError, Version, VersionedRecord};

use crate::error::ContractError;

/// Loads and saves entities through a [`LedgerStore`]
pub struct LedgerRepository<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> LedgerRepository<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    /// Loads and decodes an entity, with the version it was read at
    pub async fn load<E: LedgerEntity>(&self, key: &str) -> Result<Option<(E, Version)>, ContractError> {
        match self.store.get_state(key).await? {
            Some(VersionedRecord { value, version }) => Ok(Some((E::decode(&value)?, version))),
            None => Ok(None),
        }
    }

    /// Loads an entity that must exist
    ///
    /// # Errors
    ///
    /// `NotFound` naming `label` and `key` when the key is absent
    pub async fn require<E: LedgerEntity>(
        &self,
        key: &str,
        label: &'static str,
    ) -> Result<(E, Version), ContractError> {
        self.load(key)
            .await?
            .ok_or_else(|| ContractError::not_found(label, key))
    }

    /// Loads the stored bytes of a key without decoding them
    pub async fn load_raw(&self, key: &str, label: &'static str) -> Result<Vec<u8>, ContractError> {
        self.store
            .get_state(key)
            .await?
            .map(|record| record.value)
            .ok_or_else(|| ContractError::not_found(label, key))
    }

    /// Writes an entity under its own key
    pub async fn save<E: LedgerEntity>(&self, entity: &E) -> Result<Version, ContractError> {
        let bytes = entity.encode()?;
        Ok(self.store.put_state(entity.ledger_key(), bytes).await?)
    }

    /// Writes an entity only if its key is still at `expected`
    pub async fn save_if_version<E: LedgerEntity>(
        &self,
        entity: &E,
        expected: Version,
    ) -> Result<Version, ContractError> {
        let key = entity.ledger_key();
        let bytes = entity.encode()?;

        self.store
            .put_state_if_version(key, expected, bytes)
            .await
            .map_err(|err| match err {
                PortError::Conflict { .. } => ContractError::Conflict { key: key.to_string() },
                other => ContractError::Store(other),
            })
    }
}
