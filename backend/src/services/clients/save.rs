use super::{parse_client_form, ClientForm};
use crate::services::context::{Context, Reply};
use crate::services::orders::{order_time, OrderForm};
use chrono::NaiveDate;

/// `client add --nom .. --prenom .. --email .. [--telephone ..] [--adresse ..]`
pub fn add(ctx: &Context<'_>, form: &ClientForm) -> Reply {
    let fields = match parse_client_form(form) {
        Ok(fields) => fields,
        Err(reply) => return reply,
    };
    match ctx.store.add_client(&fields) {
        Ok(id) => Reply::Ok(format!("Client ajouté avec succès (n°{})", id)),
        Err(_) => Reply::Error(
            "Erreur lors de la sauvegarde du client (email déjà utilisé ?)".to_string(),
        ),
    }
}

/// `client add-with-order <client form> <order form> [--date ..]`
///
/// Both rows are written in one transaction: when the order is refused the
/// client is not kept either.
///
/// # Arguments
/// * `client` - The client form, checked like `client add`.
/// * `order` - Status, amount, payment method and remark of the first order.
/// * `date` - Day of the order; the time of day is taken from the command.
pub fn add_with_order(
    ctx: &Context<'_>,
    client: &ClientForm,
    order: &OrderForm,
    date: Option<NaiveDate>,
) -> Reply {
    let fields = match parse_client_form(client) {
        Ok(fields) => fields,
        Err(reply) => return reply,
    };
    // The client id is filled in by the store once the client row exists.
    let new_order = order.new_order(0, order_time(ctx, date));
    match ctx.store.add_client_with_order(&fields, &new_order) {
        Ok((client_id, order_id)) => Reply::Ok(format!(
            "Client n°{} et commande n°{} ajoutés avec succès",
            client_id, order_id
        )),
        Err(_) => Reply::Error(
            "Erreur lors de la sauvegarde du client et de sa commande (email déjà utilisé ?)"
                .to_string(),
        ),
    }
}

/// `client edit <id> --nom .. --prenom .. --email ..`. Every field is replaced,
/// so an omitted optional field is cleared.
pub fn edit(ctx: &Context<'_>, id: i64, form: &ClientForm) -> Reply {
    let fields = match parse_client_form(form) {
        Ok(fields) => fields,
        Err(reply) => return reply,
    };
    match ctx.store.update_client(id, &fields) {
        Ok(0) => Reply::Warning(format!("Client {} introuvable", id)),
        Ok(_) => Reply::Ok("Client modifié avec succès".to_string()),
        Err(_) => Reply::Error("Erreur lors de la sauvegarde du client".to_string()),
    }
}
