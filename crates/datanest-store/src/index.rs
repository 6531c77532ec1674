//! Search-index document serializer.
//!
//! One search index holds records of every data set; documents are flat,
//! keyed by the `type` discriminator, and carry dataset-specific fields
//! mapped explicitly per record type — no reflection, every mapping is
//! reviewable below.
//!
//! The per-record document built here is also the canonical comparison form
//! used by change detection, which is why dates are rendered as fixed-format
//! strings rather than anything locale-dependent.

use datanest_core::{Harvested, Organization, PartyDonation, Procurement};
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::fanout::BatchSerializer;
use crate::payload::{PayloadFormat, SerializedPayload};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Explicit record-to-document mapping for the search index.
pub trait IndexMapped: Harvested {
    fn index_doc(&self) -> Value;
}

impl IndexMapped for Organization {
    fn index_doc(&self) -> Value {
        json!({
            "id": self.global_id,
            "type": self.dataset().as_str(),
            "ico": self.ico,
            "legal_form": self.legal_form,
            "name": self.name,
            "seat": self.seat,
            "date_from": self.date_from.format(DATE_FORMAT).to_string(),
            "date_to": self.date_to.map(|d| d.format(DATE_FORMAT).to_string()),
            "source": self.source,
        })
    }
}

impl IndexMapped for PartyDonation {
    fn index_doc(&self) -> Value {
        json!({
            "id": self.global_id,
            "type": self.dataset().as_str(),
            "donor_name": self.donor_name,
            "donor_surname": self.donor_surname,
            "donor_company": self.donor_company,
            "donor_ico": self.donor_ico,
            "gift_value": self.gift_value,
            "gift_currency": self.gift_currency.code(),
            "donor_address": self.donor_address,
            "donor_city": self.donor_city,
            "recipient_party": self.recipient_party,
            "year": self.year,
            "accept_date": self.accept_date.map(|d| d.format(DATE_FORMAT).to_string()),
            "note": self.note,
        })
    }
}

impl IndexMapped for Procurement {
    fn index_doc(&self) -> Value {
        json!({
            "id": self.global_id,
            "type": self.dataset().as_str(),
            "year": self.year,
            "bulletin_id": self.bulletin_id,
            "procurement_id": self.procurement_id,
            "subject": self.subject,
            "price": self.price,
            "currency": self.currency.code(),
            "vat_included": self.vat_included,
            "customer_ico": self.customer_ico,
            "supplier_ico": self.supplier_ico,
            "source": self.source,
        })
    }
}

/// Converts a batch into one JSON-array payload for the search index.
pub struct IndexSerializer {
    index_name: String,
}

impl IndexSerializer {
    #[must_use]
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
        }
    }
}

impl<R: IndexMapped> BatchSerializer<R> for IndexSerializer {
    fn name(&self) -> &'static str {
        "index"
    }

    fn build(&self, batch: &[R]) -> Result<Vec<SerializedPayload>, StoreError> {
        let docs: Vec<Value> = batch.iter().map(IndexMapped::index_doc).collect();
        let body =
            serde_json::to_string(&docs).map_err(|e| StoreError::Serialization {
                serializer: "index",
                reason: e.to_string(),
            })?;
        Ok(vec![SerializedPayload {
            backend: self.index_name.clone(),
            format: PayloadFormat::IndexJson,
            body,
            context: None,
        }])
    }
}
