use clap::Parser;
use rollbot::interaction::{roll_reply, InteractionResponse};
use rollbot::roll::{self, Evaluation, SimpleStringifier};
use rollbot::{classify, RollConfig};
use std::io::{self, BufRead, Write};

/// Reads one roll per line and prints the result.
#[derive(Parser, Debug)]
#[command(name = "repl")]
struct Args {
    /// Most dice a single line may roll
    #[arg(long, default_value_t = RollConfig::DEFAULT_MAX_ROLLS)]
    max_rolls: usize,

    /// Longest transcript before it is summarized
    #[arg(long, default_value_t = RollConfig::DEFAULT_MAX_LEN)]
    max_len: usize,

    /// Plain text instead of Markdown
    #[arg(long)]
    plain: bool,

    /// Name the roll is attributed to
    #[arg(long, default_value = "You")]
    name: String,

    /// Print the reply envelope as JSON
    #[arg(long, conflicts_with = "plain")]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    rollbot::logging::init("warn")?;
    let config = RollConfig::default()
        .with_max_rolls(args.max_rolls)
        .with_max_len(args.max_len);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if !line.trim().is_empty() {
            if args.json {
                let reply = InteractionResponse::message(roll_reply(&line, &args.name, &config));
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else if args.plain {
                match roll::evaluate(&classify(&line), &config) {
                    Ok(Evaluation::Rolled(outcome)) => println!(
                        "{}",
                        roll::render(&mut SimpleStringifier::new(), &outcome, config.max_len)
                    ),
                    Ok(Evaluation::Help) => println!("{}", roll::USAGE),
                    Err(why) => eprintln!("{}", why),
                }
            } else {
                println!("{}", roll_reply(&line, &args.name, &config));
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
