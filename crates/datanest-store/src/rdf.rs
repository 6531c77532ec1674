//! RDF/XML serializer.
//!
//! Each batch becomes one `rdf:RDF` document with one `skos:Concept` per
//! record. Field-to-predicate mappings are explicit per record type via
//! [`RdfMapped`]; the `rdf:about` URI is `<base-uri><stable-key>` where the
//! stable key is the record's business key (organization ICO, procurement
//! id) or, for donations, the global id — donations have no business key of
//! their own.
//!
//! Besides the per-dataset payload, every batch also yields a "combined"
//! payload rooted at the shared cross-dataset base URI and tagged with the
//! dataset's own base URI as context, enabling cross-dataset querying later.

use datanest_core::{Harvested, Organization, PartyDonation, Procurement};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::StoreError;
use crate::fanout::BatchSerializer;
use crate::payload::{PayloadFormat, SerializedPayload};

/// Shared base URI of the combined cross-dataset payload.
pub const COMBINED_BASE_URI: &str = "http://opendata.sk/dataset/combined/";

const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const NS_SKOS: &str = "http://www.w3.org/2004/02/skos/core#";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_OPENDATA: &str = "http://opendata.sk/2011/02/opendicts#";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Explicit field-to-predicate mapping for RDF output.
///
/// Predicate values must already be XML-safe: text fields are escaped at
/// scrape time, everything else is derived (dates, formatted numbers,
/// currency codes). The serializer writes them through verbatim.
pub trait RdfMapped: Harvested {
    /// Stable key appended to the base URI for `rdf:about`.
    fn about_key(&self) -> &str;
    /// `skos:prefLabel` text.
    fn pref_label(&self) -> String;
    /// `(qualified predicate name, value)` pairs, in output order.
    fn predicates(&self) -> Vec<(&'static str, String)>;
}

impl RdfMapped for Organization {
    fn about_key(&self) -> &str {
        &self.ico
    }

    fn pref_label(&self) -> String {
        self.name.clone()
    }

    fn predicates(&self) -> Vec<(&'static str, String)> {
        let mut preds = vec![
            ("opendata:ico", self.ico.clone()),
            ("opendata:legalForm", self.legal_form.clone()),
            ("opendata:seat", self.seat.clone()),
            (
                "opendata:dateFrom",
                self.date_from.format(DATE_FORMAT).to_string(),
            ),
        ];
        if let Some(date_to) = self.date_to {
            preds.push(("opendata:dateTo", date_to.format(DATE_FORMAT).to_string()));
        }
        preds.push(("dc:source", self.source.clone()));
        preds
    }
}

impl RdfMapped for PartyDonation {
    fn about_key(&self) -> &str {
        &self.global_id
    }

    fn pref_label(&self) -> String {
        if self.donor_company.is_empty() {
            format!("{} {}", self.donor_name, self.donor_surname)
                .trim()
                .to_owned()
        } else {
            self.donor_company.clone()
        }
    }

    fn predicates(&self) -> Vec<(&'static str, String)> {
        let mut preds = vec![
            ("opendata:donorName", self.donor_name.clone()),
            ("opendata:donorSurname", self.donor_surname.clone()),
            ("opendata:donorCompany", self.donor_company.clone()),
            ("opendata:donorIco", self.donor_ico.clone()),
            ("opendata:giftValue", format!("{:.2}", self.gift_value)),
            (
                "opendata:giftCurrency",
                self.gift_currency.code().to_owned(),
            ),
            ("opendata:donorAddress", self.donor_address.clone()),
            ("opendata:donorCity", self.donor_city.clone()),
            ("opendata:recipientParty", self.recipient_party.clone()),
            ("opendata:year", self.year.clone()),
        ];
        if let Some(accept_date) = self.accept_date {
            preds.push((
                "opendata:acceptDate",
                accept_date.format(DATE_FORMAT).to_string(),
            ));
        }
        if let Some(note) = &self.note {
            preds.push(("opendata:note", note.clone()));
        }
        preds
    }
}

impl RdfMapped for Procurement {
    fn about_key(&self) -> &str {
        &self.procurement_id
    }

    fn pref_label(&self) -> String {
        self.subject.clone()
    }

    fn predicates(&self) -> Vec<(&'static str, String)> {
        vec![
            ("opendata:year", self.year.clone()),
            ("opendata:bulletinId", self.bulletin_id.clone()),
            ("opendata:procurementId", self.procurement_id.clone()),
            ("opendata:price", format!("{:.2}", self.price)),
            ("opendata:currency", self.currency.code().to_owned()),
            ("opendata:vatIncluded", self.vat_included.to_string()),
            ("opendata:customerIco", self.customer_ico.clone()),
            ("opendata:supplierIco", self.supplier_ico.clone()),
            ("dc:source", self.source.clone()),
        ]
    }
}

/// Builds the per-dataset RDF payload plus the combined cross-dataset
/// variant for each batch.
pub struct RdfSerializer {
    base_uri: String,
}

impl RdfSerializer {
    #[must_use]
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
        }
    }
}

impl<R: RdfMapped> BatchSerializer<R> for RdfSerializer {
    fn name(&self) -> &'static str {
        "rdf"
    }

    fn build(&self, batch: &[R]) -> Result<Vec<SerializedPayload>, StoreError> {
        let primary = SerializedPayload {
            backend: self.base_uri.clone(),
            format: PayloadFormat::RdfXml,
            body: render(batch, &self.base_uri)?,
            context: None,
        };
        let combined = SerializedPayload {
            backend: COMBINED_BASE_URI.to_owned(),
            format: PayloadFormat::RdfXml,
            body: render(batch, COMBINED_BASE_URI)?,
            context: Some(self.base_uri.clone()),
        };
        Ok(vec![primary, combined])
    }
}

fn render<R: RdfMapped>(batch: &[R], base_uri: &str) -> Result<String, StoreError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut root = BytesStart::new("rdf:RDF");
    root.push_attribute(("xmlns:rdf", NS_RDF));
    root.push_attribute(("xmlns:skos", NS_SKOS));
    root.push_attribute(("xmlns:dc", NS_DC));
    root.push_attribute(("xmlns:opendata", NS_OPENDATA));
    emit(&mut writer, Event::Start(root))?;

    for record in batch {
        let about = format!("{base_uri}{}", record.about_key());
        let mut concept = BytesStart::new("skos:Concept");
        concept.push_attribute(("rdf:about", about.as_str()));
        emit(&mut writer, Event::Start(concept))?;

        write_text_element(&mut writer, "skos:prefLabel", &record.pref_label())?;
        for (name, value) in record.predicates() {
            write_text_element(&mut writer, name, &value)?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("skos:Concept")))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("rdf:RDF")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| StoreError::Serialization {
        serializer: "rdf",
        reason: e.to_string(),
    })
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), StoreError> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    // Values are pre-escaped (scrape time) or derived; write them verbatim.
    emit(writer, Event::Text(BytesText::from_escaped(value)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), StoreError> {
    writer
        .write_event(event)
        .map_err(|e| StoreError::Serialization {
            serializer: "rdf",
            reason: e.to_string(),
        })
}
