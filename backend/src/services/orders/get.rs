use crate::report::display_amount;
use crate::services::context::{Context, Reply};

/// `order show <id>`
pub fn process(ctx: &Context<'_>, id: i64) -> Reply {
    let order = match ctx.store.get_order(id) {
        Ok(Some(order)) => order,
        Ok(None) => return Reply::Warning(format!("Commande {} introuvable", id)),
        Err(_) => {
            return Reply::Error("Impossible de charger les données de la commande".to_string())
        }
    };
    let client = match ctx.store.get_client(order.client_id) {
        Ok(Some(client)) => client.fields.display_name(),
        _ => format!("client n°{}", order.client_id),
    };
    Reply::Ok(format!(
        "Commande n°{}\n  Client   : {}\n  Date     : {}\n  Statut   : {}\n  Montant  : {}\n  Paiement : {}\n  Remarque : {}",
        order.id,
        client,
        order.placed_at.format("%d/%m/%Y %H:%M"),
        order.status,
        display_amount(order.total_amount),
        order.payment_method,
        order.remark
    ))
}
