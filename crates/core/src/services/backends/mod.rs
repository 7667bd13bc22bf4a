pub mod nix_locate;
pub mod nix_store;
pub mod shell_selector;

pub use nix_locate::NixLocate;
pub use nix_store::NixStore;
pub use shell_selector::ShellSelector;
