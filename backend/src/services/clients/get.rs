use crate::report::display_amount;
use crate::services::context::{Context, Reply};
use std::fmt::Write;

/// `client list [texte]`: every client with its order count, or the clients
/// whose name or email contains the text.
///
/// # Arguments
/// * `text` - Optional search text. Absent or blank lists everyone.
///
/// # Returns
/// - `Reply::Ok` with one line per client and a count, or "Aucun client.".
/// - `Reply::Error` if the store cannot be read.
pub fn list(ctx: &Context<'_>, text: Option<&str>) -> Reply {
    let text = text.map(str::trim).unwrap_or_default();
    let rows = if text.is_empty() {
        ctx.store.clients_with_order_counts().map(|rows| {
            rows.into_iter()
                .map(|row| (row.client, Some(row.order_count)))
                .collect::<Vec<_>>()
        })
    } else {
        ctx.store
            .search_clients(text)
            .map(|clients| clients.into_iter().map(|c| (c, None)).collect())
    };
    let rows = match rows {
        Ok(rows) => rows,
        Err(_) => return Reply::Error("Impossible de charger la liste des clients".to_string()),
    };
    if rows.is_empty() {
        return Reply::Ok("Aucun client.".to_string());
    }

    let mut out = format!(
        "{:>5}  {:<30}  {:<30}  {:<14}  {}\n",
        "N°", "Client", "Email", "Téléphone", "Commandes"
    );
    for (client, order_count) in &rows {
        let _ = writeln!(
            out,
            "{:>5}  {:<30}  {:<30}  {:<14}  {}",
            client.id,
            client.fields.display_name(),
            client.fields.email,
            client.fields.phone,
            order_count.map(|n| n.to_string()).unwrap_or_default()
        );
    }
    let _ = write!(out, "{} client(s)", rows.len());
    Reply::Ok(out)
}

/// `client show <id>`: the client form plus its order count and revenue.
pub fn show(ctx: &Context<'_>, id: i64) -> Reply {
    let client = match ctx.store.get_client(id) {
        Ok(Some(client)) => client,
        Ok(None) => return Reply::Warning(format!("Client {} introuvable", id)),
        Err(_) => {
            return Reply::Error("Impossible de charger les données du client".to_string())
        }
    };
    let (count, revenue) = match (
        ctx.store.order_count_for_client(id),
        ctx.store.total_revenue_for_client(id),
    ) {
        (Ok(count), Ok(revenue)) => (count, revenue),
        _ => return Reply::Error("Impossible de charger les données du client".to_string()),
    };

    let fields = &client.fields;
    Reply::Ok(format!(
        "Client n°{}\n  Nom       : {}\n  Prénom    : {}\n  Email     : {}\n  Téléphone : {}\n  Adresse   : {}\n  Commandes : {}\n  Chiffre d'affaires : {}",
        client.id,
        fields.last_name,
        fields.first_name,
        fields.email,
        fields.phone,
        fields.address,
        count,
        display_amount(revenue)
    ))
}
