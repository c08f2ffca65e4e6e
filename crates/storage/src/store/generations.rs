#![forbid(unsafe_code)]

use super::error::WriteFailure;
use super::tables::*;
use super::{DataSpace, DeleteGenerationsRequest, DuplicateGenerationRequest, StoreError};
use ds_core::ids::{GenerationId, OwnerId};
use tracing::{info, warn};

impl DataSpace {
    /// Highest generation ever inserted for `owner_id`, or generation 0 when
    /// the owner has no rows.
    pub fn get_last_generation_id(&self, owner_id: &OwnerId) -> Result<GenerationId, StoreError> {
        match max_generation(self.conn()?, owner_id.as_str())? {
            Some(value) => to_generation(value),
            None => Ok(GenerationId::ZERO),
        }
    }

    pub fn list_generations(&self, owner_id: &OwnerId) -> Result<Vec<GenerationId>, StoreError> {
        generations(self.conn()?, owner_id.as_str())?
            .into_iter()
            .map(to_generation)
            .collect()
    }

    pub fn list_keys(
        &self,
        owner_id: &OwnerId,
        generation_id: GenerationId,
    ) -> Result<Vec<String>, StoreError> {
        Ok(generation_keys(
            self.conn()?,
            owner_id.as_str(),
            generation_id.get(),
        )?)
    }

    /// Copies every row of one generation into another across all three
    /// stores in a single transaction. Existing rows in the target generation
    /// are left in place. Returns the number of records copied.
    pub fn duplicate(&mut self, request: DuplicateGenerationRequest) -> Result<usize, StoreError> {
        let owner_id = request.owner_id.as_str();
        let from = request.from_generation_id.get();
        let to = request.to_generation_id.get();

        let tx = self
            .conn_mut()?
            .transaction()
            .map_err(|err| StoreError::write("duplicate", err))?;

        let mut copied = [0usize; 3];
        for (slot, table) in copied.iter_mut().zip(ROW_STORES.iter()) {
            *slot = copy_generation_tx(&tx, table, owner_id, from, to).map_err(|err| {
                warn!(owner = owner_id, from, to, table = table.name, error = %err, "duplicate rolled back");
                StoreError::write("duplicate", err)
            })?;
        }

        let [dataproduct, header, metadata] = copied;
        if dataproduct != header || dataproduct != metadata {
            warn!(owner = owner_id, from, to, "duplicate found misaligned stores; rolled back");
            return Err(StoreError::Write {
                op: "duplicate",
                source: WriteFailure::Misaligned {
                    dataproduct,
                    header,
                    metadata,
                },
            });
        }

        tx.commit()
            .map_err(|err| StoreError::write("duplicate", err))?;

        info!(owner = owner_id, from, to, records = dataproduct, "generation duplicated");
        Ok(dataproduct)
    }

    /// Removes the newest generation of an owner, or all of its generations.
    /// Returns the number of records removed.
    pub fn delete(&mut self, request: DeleteGenerationsRequest) -> Result<usize, StoreError> {
        let owner_id = request.owner_id.as_str();

        let tx = self
            .conn_mut()?
            .transaction()
            .map_err(|err| StoreError::write("delete", err))?;

        let scope = if request.all_generations {
            None
        } else {
            let Some(latest) =
                max_generation(&tx, owner_id).map_err(|err| StoreError::write("delete", err))?
            else {
                return Ok(0);
            };
            Some(latest)
        };

        let mut removed = 0usize;
        for table in &ROW_STORES {
            let deleted = match scope {
                Some(generation) => delete_generation_tx(&tx, table, owner_id, generation),
                None => delete_owner_tx(&tx, table, owner_id),
            }
            .map_err(|err| {
                warn!(owner = owner_id, table = table.name, error = %err, "delete rolled back");
                StoreError::write("delete", err)
            })?;
            if table.name == DATAPRODUCT.name {
                removed = deleted;
            }
        }

        tx.commit().map_err(|err| StoreError::write("delete", err))?;

        match scope {
            Some(generation) => {
                info!(owner = owner_id, generation, records = removed, "generation deleted")
            }
            None => info!(owner = owner_id, records = removed, "all generations deleted"),
        }
        Ok(removed)
    }
}

// A negative generation in storage is a corrupt row.
fn to_generation(value: i64) -> Result<GenerationId, StoreError> {
    GenerationId::try_new(value)
        .map_err(|_| StoreError::Sql(rusqlite::Error::IntegralValueOutOfRange(0, value)))
}
