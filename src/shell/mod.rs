//! # Shell Interaction
//!
//! gitcd cannot change the directory of the shell that started it. Instead
//! it writes a tiny script that a wrapper function sources:
//!
//! ```bash
//! gcd() {
//!     gitcd "$@" && [ -f ~/.config/gitcd/change_dir.sh ] && \
//!         source ~/.config/gitcd/change_dir.sh && rm ~/.config/gitcd/change_dir.sh
//! }
//! ```
//!
//! When a query matches several projects, a numbered menu is printed and the
//! user picks one by number (`q` or `0` quits).

pub mod changer;
pub mod menu;

pub use changer::{cd_script, current_shell, shell_quote, write_cd_script, DEFAULT_SHELL};
pub use menu::{parse_selection, prompt_selection, render_menu, validate_choice, Selection};
