use super::{order_time, OrderForm};
use crate::services::context::{Context, Reply};
use chrono::NaiveDate;

/// `order add <client> --statut .. --montant .. [--paiement ..] [--remarque ..] [--date ..]`
///
/// # Arguments
/// * `client_id` - The owning client; it must exist.
/// * `form` - Already validated by the parser.
/// * `date` - Day of the order. The time of day is the time of the command.
///
/// # Returns
/// - `Reply::Ok` with the id of the new order.
/// - `Reply::Warning` if the client does not exist.
/// - `Reply::Error` if the store refuses the insert.
pub fn add(
    ctx: &Context<'_>,
    client_id: i64,
    form: &OrderForm,
    date: Option<NaiveDate>,
) -> Reply {
    match ctx.store.get_client(client_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Reply::Warning(format!("Client {} introuvable", client_id)),
        Err(_) => return Reply::Error("Erreur lors de la sauvegarde de la commande".to_string()),
    }

    let order = form.new_order(client_id, order_time(ctx, date));
    match ctx.store.add_order(&order) {
        Ok(id) => Reply::Ok(format!("Commande ajoutée avec succès (n°{})", id)),
        Err(_) => Reply::Error("Erreur lors de la sauvegarde de la commande".to_string()),
    }
}

/// `order edit <id> --statut .. --montant .. [--paiement ..] [--remarque ..]`.
/// The client and the date of the order never change.
pub fn edit(ctx: &Context<'_>, id: i64, form: &OrderForm) -> Reply {
    match ctx.store.update_order(id, &form.update()) {
        Ok(0) => Reply::Warning(format!("Commande {} introuvable", id)),
        Ok(_) => Reply::Ok("Commande modifiée avec succès".to_string()),
        Err(_) => Reply::Error("Erreur lors de la sauvegarde de la commande".to_string()),
    }
}
