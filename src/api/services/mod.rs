pub mod helpers;
pub mod links;
pub mod portal;
pub mod redirect;

pub use portal::portal_routes;
pub use redirect::{RedirectService, redirect_routes};
