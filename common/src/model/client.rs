use serde::{Deserialize, Serialize};

/// Editable attributes of a client, as entered in the client form.
///
/// Last name, first name and email are required. The store does not check it;
/// the console validates them before any insert or update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientFields {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl ClientFields {
    /// "Prénom Nom", the way clients are labelled in tables and reports.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A persisted client. The id is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    #[serde(flatten)]
    pub fields: ClientFields,
}

/// One line of the client table: the client plus how many orders it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOrderCount {
    pub client: Client,
    pub order_count: i64,
}
