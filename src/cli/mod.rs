// cli — implementations behind the `satchel` subcommands.

pub mod cache;
pub mod csv_view;
pub mod locale_show;
pub mod path_tools;
