use clap::{CommandFactory, Parser};
use memora_core::{DEFAULT_PLAYER, Difficulty};
use wasm_bindgen::prelude::*;

mod audio;
mod game;
mod ranking;
mod storage;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Player name, used for the score ranking
    #[arg(long, default_value = DEFAULT_PLAYER)]
    name: String,

    /// Difficulty: easy, medium or hard
    #[arg(long, alias = "nivel")]
    level: Option<String>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    /// Parses a URL query, ignoring parameters that are not flags of this app.
    fn from_query(search: &str, decode: impl Fn(&str) -> String) -> Result<Self, clap::Error> {
        let command = Self::command();
        let is_known = |key: &str| {
            command.get_arguments().any(|arg| {
                arg.get_long() == Some(key)
                    || arg
                        .get_all_aliases()
                        .is_some_and(|aliases| aliases.iter().any(|alias| *alias == key))
            })
        };
        Self::try_parse_from(utils::query_to_args(search, decode, is_known))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let search = window().location().search().unwrap_or_default();
    let mut parse_error = None;
    let args = Args::from_query(&search, utils::js_decode_component).unwrap_or_else(|err| {
        parse_error = Some(err);
        Args::parse_from(["memora"])
    });
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("Error initializing logger: {}", err));
        }
    }
    if let Some(err) = parse_error {
        log::warn!("Ignoring unparseable URL parameters: {}", err);
    }

    let difficulty = args
        .level
        .as_deref()
        .map_or_else(Difficulty::default, Difficulty::parse_or_default);
    log::debug!("player: {:?}, difficulty: {}, seed: {:?}", args.name, difficulty, args.seed);

    let Some(root) = document().get_element_by_id("game") else {
        log::error!("Could not find id=\"game\" element");
        return;
    };

    let props = game::GameProps {
        player: args.name.clone(),
        difficulty,
        seed: args.seed,
    };

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(raw: &str) -> String {
        raw.to_string()
    }

    #[test]
    fn foreign_parameters_keep_known_ones() {
        let args = Args::from_query("?name=Ana&nivel=facil&fbclid=abc", plain).unwrap();

        assert_eq!(args.name, "Ana");
        assert_eq!(args.level.as_deref(), Some("facil"));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn verbosity_and_seed_come_through() {
        let args = Args::from_query("?seed=42&vv&utm_source=mail", plain).unwrap();

        assert_eq!(args.name, DEFAULT_PLAYER);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }
}
