//! Interactive command parsing.

use std::str::FromStr;

use anyhow::bail;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Refresh both quantities and show converted prices.
    Fetch,
    /// Show converted prices from cache, if both values are cached.
    Show,
    /// Resolve one quantity and print the JSON response.
    Rate { name: String, force: bool },
    Clear,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  fetch               fetch live XAU/USD and USD/INR, then convert
  show                show converted prices from cache
  rate <name> [--force]
                      look up one quantity (xau_usd, usd_inr)
  clear               clear cached rates
  help                show this help
  quit                exit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "fetch" | "f" => Command::Fetch,
            "show" | "s" => Command::Show,
            "clear" | "c" => Command::Clear,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "rate" | "r" => {
                let mut name = None;
                let mut force = false;
                for word in words.by_ref() {
                    match word {
                        "--force" | "-f" => force = true,
                        other if name.is_none() => name = Some(other.to_string()),
                        other => bail!("unexpected argument '{}'", other),
                    }
                }
                let Some(name) = name else {
                    bail!("usage: rate <name> [--force]");
                };
                return Ok(Command::Rate { name, force });
            }
            other => bail!("unknown command '{}' (try `help`)", other),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument '{}'", extra);
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("fetch".parse::<Command>().unwrap(), Command::Fetch);
        assert_eq!("  SHOW ".parse::<Command>().unwrap(), Command::Show);
        assert_eq!("q".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(
            "rate usd_inr --force".parse::<Command>().unwrap(),
            Command::Rate {
                name: "usd_inr".to_string(),
                force: true
            }
        );
        assert_eq!(
            "r xau_usd".parse::<Command>().unwrap(),
            Command::Rate {
                name: "xau_usd".to_string(),
                force: false
            }
        );
        assert!("rate".parse::<Command>().is_err());
        assert!("rate a b".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("fetch now".parse::<Command>().is_err());
        assert!("buy".parse::<Command>().unwrap_err().to_string().contains("unknown command"));
    }
}
