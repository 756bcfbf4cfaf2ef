//! # Client Commands
//!
//! This module groups every console command acting on client records. The
//! `client` word of a line selects it; the next word picks the action and
//! `process` routes it to the handler in one of the sub-modules.
//!
//! ## Sub-modules:
//! - `get`: listing, searching and showing clients with their order figures.
//! - `save`: creation (alone or together with a first order) and update.
//! - `delete`: removal, refused while the client still owns orders.
//!
//! ## Form
//!
//! Client fields are named options, quoted when they hold spaces:
//! `--nom "De La Cruz" --prenom Ana --email ana@example.com --telephone 0601020304 --adresse "3 rue Haute"`.
//! Last name, first name and email are mandatory; the check is made here,
//! after trimming, before anything reaches the store.

mod delete;
mod get;
mod save;

use super::context::{Context, Reply};
use super::orders::OrderForm;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use common::model::client::ClientFields;

#[derive(Debug, Subcommand)]
pub enum ClientAction {
    /// Liste les clients avec leur nombre de commandes, ou ceux dont le nom,
    /// le prénom ou l'email contient le texte
    List {
        /// Texte recherché (sensible à la casse)
        texte: Option<String>,
    },
    /// Fiche d'un client avec son nombre de commandes et son chiffre d'affaires
    Show {
        /// Numéro du client
        id: i64,
    },
    /// Ajoute un client
    Add(ClientForm),
    /// Ajoute un client et sa première commande en une seule opération
    AddWithOrder {
        #[command(flatten)]
        client: ClientForm,
        #[command(flatten)]
        order: OrderForm,
        /// Date de la commande (AAAA-MM-JJ ou JJ/MM/AAAA), aujourd'hui par défaut
        #[arg(long, value_parser = super::cli::parse_day)]
        date: Option<NaiveDate>,
    },
    /// Remplace tous les champs d'un client
    Edit {
        /// Numéro du client
        id: i64,
        #[command(flatten)]
        form: ClientForm,
    },
    /// Supprime un client sans commande
    Delete {
        /// Numéro du client
        id: i64,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ClientForm {
    /// Nom (obligatoire)
    #[arg(long, default_value = "")]
    pub nom: String,
    /// Prénom (obligatoire)
    #[arg(long, default_value = "")]
    pub prenom: String,
    /// Email, unique (obligatoire)
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub telephone: String,
    #[arg(long, default_value = "")]
    pub adresse: String,
}

/// Routes a parsed `client ...` line to its handler.
///
/// # Arguments
/// * `ctx` - Store, configuration and time of the command.
/// * `action` - The action and its arguments, as parsed by `clap`.
///
/// # Returns
/// The message to show: `Reply::Ok` on success, `Reply::Warning` when the
/// input or the record state refuses the action, `Reply::Error` when the
/// store fails.
pub fn process(ctx: &Context<'_>, action: ClientAction) -> Reply {
    match action {
        ClientAction::List { texte } => get::list(ctx, texte.as_deref()),
        ClientAction::Show { id } => get::show(ctx, id),
        ClientAction::Add(form) => save::add(ctx, &form),
        ClientAction::AddWithOrder {
            client,
            order,
            date,
        } => save::add_with_order(ctx, &client, &order, date),
        ClientAction::Edit { id, form } => save::edit(ctx, id, &form),
        ClientAction::Delete { id } => delete::process(ctx, id),
    }
}

/// Checks the form and turns it into store fields.
pub(crate) fn parse_client_form(form: &ClientForm) -> Result<ClientFields, Reply> {
    let client = ClientFields {
        last_name: form.nom.trim().to_string(),
        first_name: form.prenom.trim().to_string(),
        email: form.email.trim().to_string(),
        phone: form.telephone.trim().to_string(),
        address: form.adresse.trim().to_string(),
    };
    if client.last_name.is_empty() || client.first_name.is_empty() || client.email.is_empty() {
        return Err(Reply::Warning(
            "Les champs Nom, Prénom et Email sont obligatoires".to_string(),
        ));
    }
    Ok(client)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn form(nom: &str, prenom: &str, email: &str) -> ClientForm {
        ClientForm {
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            email: email.to_string(),
            ..ClientForm::default()
        }
    }

    #[test]
    fn full_form() {
        let form = ClientForm {
            telephone: "0601020304".to_string(),
            adresse: "3 rue Haute".to_string(),
            ..form("De La Cruz", " Ana ", "ana@example.com")
        };
        let fields = parse_client_form(&form).unwrap();
        assert_eq!(fields.last_name, "De La Cruz");
        assert_eq!(fields.first_name, "Ana");
        assert_eq!(fields.email, "ana@example.com");
        assert_eq!(fields.phone, "0601020304");
        assert_eq!(fields.address, "3 rue Haute");
    }

    #[test]
    fn required_fields_are_checked_after_trimming() {
        for form in [
            form("", "", ""),
            form("Dupont", "Jean", ""),
            form("Dupont", "  ", "jean@example.com"),
            form(" ", "Jean", "j@e.fr"),
        ] {
            assert_eq!(
                parse_client_form(&form),
                Err(Reply::Warning(
                    "Les champs Nom, Prénom et Email sont obligatoires".to_string()
                )),
                "form {:?}",
                form
            );
        }
    }
}
