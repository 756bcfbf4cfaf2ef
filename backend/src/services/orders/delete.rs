use crate::services::context::{Context, Reply};

/// `order delete <id>`
pub fn process(ctx: &Context<'_>, id: i64) -> Reply {
    match ctx.store.delete_order(id) {
        Ok(0) => Reply::Warning(format!("Commande {} introuvable", id)),
        Ok(_) => Reply::Ok("Commande supprimée avec succès".to_string()),
        Err(_) => Reply::Error("Erreur lors de la suppression de la commande".to_string()),
    }
}
