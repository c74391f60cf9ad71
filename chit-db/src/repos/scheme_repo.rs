//! Scheme queries

use crate::store::Tables;
use chit_core::error::{ChitError, ChitResult};
use chit_core::types::{Scheme, SchemeId};

impl Tables {
    pub fn insert_scheme(&mut self, scheme: Scheme) {
        self.schemes.insert(scheme.scheme_id.clone(), scheme);
    }

    pub fn scheme(&self, id: &SchemeId) -> ChitResult<&Scheme> {
        self.schemes
            .get(id)
            .ok_or_else(|| ChitError::not_found("Scheme", id.as_str()))
    }

    pub fn scheme_mut(&mut self, id: &SchemeId) -> ChitResult<&mut Scheme> {
        self.schemes
            .get_mut(id)
            .ok_or_else(|| ChitError::not_found("Scheme", id.as_str()))
    }

    /// All schemes, newest first
    pub fn list_schemes(&self) -> Vec<&Scheme> {
        let mut schemes: Vec<&Scheme> = self.schemes.values().collect();
        schemes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.scheme_id.cmp(&b.scheme_id)));
        schemes
    }
}
