use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use idgen::Category;

pub const CATEGORY_ENV: &str = "IDGEN_CATEGORY";
pub const CACHE_DIR_ENV: &str = "IDGEN_CACHE_DIR";

pub const DEFAULT_CACHE_DIR: &str = ".idgen";

#[derive(Debug, Parser)]
#[command(name = "idgen", about = "ID Generator and Parser")]
pub struct CLI {
    /// Which category of ID to use: order or order-m
    #[arg(short, long, env = CATEGORY_ENV, value_parser = Category::from_str, default_value_t = Category::Order)]
    pub category: Category,

    /// Directory holding the persisted sequence counters
    #[arg(long, env = CACHE_DIR_ENV, default_value = DEFAULT_CACHE_DIR)]
    pub cache_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate new id(s)
    #[command(visible_alias = "g")]
    Generate {
        /// How many ids to generate
        #[arg(short = 'n', default_value_t = 1)]
        count: usize,

        /// Category specific data in JSON, e.g. '{"sequence": 100}'
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Parse a given id
    #[command(visible_alias = "p")]
    Parse {
        /// The id to be parsed
        id: String,
    },
}
