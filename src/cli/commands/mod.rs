mod show;
mod sync;

pub use show::cmd_show_tour;
pub use sync::cmd_sync_page;
