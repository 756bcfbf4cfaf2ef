use crate::services::context::{Context, Reply};

/// `client delete <id>`. A client that still owns orders is kept.
///
/// The order count is read first so the warning can say how many orders
/// stand in the way; the foreign key refuses the delete anyway.
pub fn process(ctx: &Context<'_>, id: i64) -> Reply {
    match ctx.store.order_count_for_client(id) {
        Ok(0) => {}
        Ok(count) => {
            return Reply::Warning(format!(
                "Impossible de supprimer le client {} : {} commande(s) associée(s)",
                id, count
            ))
        }
        Err(_) => return Reply::Error("Erreur lors de la suppression du client".to_string()),
    }
    match ctx.store.delete_client(id) {
        Ok(0) => Reply::Warning(format!("Client {} introuvable", id)),
        Ok(_) => Reply::Ok("Client supprimé avec succès".to_string()),
        Err(_) => Reply::Error("Erreur lors de la suppression du client".to_string()),
    }
}
