mod commands;
mod config;
mod main_lib;
mod render;

use commands::Command;
use config::Config;
use main_lib::{build_state, execute, init_tracing, Flow};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(config)?;

    // `goldrate fetch`, `goldrate rate usd_inr --force`: run once and exit.
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let command: Command = args.join(" ").parse()?;
        let (text, _) = execute(&state, command).await?;
        println!("{}", text);
        return Ok(());
    }

    println!("Gold rate (INR per 10g). Type `help` for commands.");
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match execute(&state, command).await {
            Ok((_, Flow::Exit)) => break,
            Ok((text, Flow::Continue)) => println!("{}", text),
            Err(e) => {
                tracing::error!("Command failed: {:#}", e);
                println!("Error: {}", e);
            }
        }
    }

    Ok(())
}
