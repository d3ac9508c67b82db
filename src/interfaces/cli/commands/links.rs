//! Link management commands

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{LinkInput, LinkService};

pub async fn add_link(service: &LinkService, path: String, url: String) -> Result<(), CliError> {
    let link = service.create_link(LinkInput::new(path, url)).await?;

    println!(
        "{} Added link #{}: {} -> {}",
        "✓".bold().green(),
        link.id,
        link.path.cyan(),
        link.url.blue().underline()
    );
    Ok(())
}

pub async fn update_link(
    service: &LinkService,
    id: i64,
    path: String,
    url: String,
) -> Result<(), CliError> {
    let link = service.update_link(id, LinkInput::new(path, url)).await?;

    println!(
        "{} Updated link #{}: {} -> {}",
        "✓".bold().green(),
        link.id,
        link.path.cyan(),
        link.url.blue().underline()
    );
    Ok(())
}

pub async fn remove_link(service: &LinkService, id: i64) -> Result<(), CliError> {
    service.delete_link(id).await?;
    println!("{} Deleted link #{}", "✓".bold().green(), id);
    Ok(())
}

pub async fn list_links(service: &LinkService, search: Option<String>) -> Result<(), CliError> {
    let links = service.list_links(search.as_deref()).await?;

    if links.is_empty() {
        println!("{} No links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Links:".bold().green());
    println!();
    for link in &links {
        println!(
            "  {:>4}  {} -> {}",
            link.id.to_string().dimmed(),
            link.path.cyan(),
            link.url.blue().underline()
        );
    }
    println!();
    println!(
        "{} Total {} links",
        "ℹ".bold().blue(),
        links.len().to_string().green()
    );
    Ok(())
}
