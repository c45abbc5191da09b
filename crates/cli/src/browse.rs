//! Interactive line-driven listing session

use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use jobboard_core::application::{
    shutdown_channel, InitialFilters, Intent, ListingController, ListingSession, ViewModel,
};
use jobboard_core::domain::{JobId, LocationFilter};
use jobboard_core::port::{ListingEndpoint, SystemTimeProvider};

use crate::render;

const HELP: &str = "\
commands:
  s <text>      edit search text     l <any|remote|hybrid|onsite>  edit location
  go            run search           n / p         next / previous page
  g <page>      go to page           r             reload
  o <id>        open job detail      x             close detail
  h             help                 q             quit";

/// Parsed input line
#[derive(Debug, PartialEq)]
enum Command {
    Send(Intent),
    Help,
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head {
        "s" => Command::Send(Intent::SetSearchText(rest.to_string())),
        "l" => match rest.parse::<LocationFilter>() {
            Ok(location) => Command::Send(Intent::SetLocationType(location)),
            Err(e) => Command::Invalid(e.to_string()),
        },
        "go" => Command::Send(Intent::Search),
        "n" => Command::Send(Intent::NextPage),
        "p" => Command::Send(Intent::PreviousPage),
        "g" => match rest.parse::<u32>() {
            Ok(page) => Command::Send(Intent::GoToPage(page)),
            Err(_) => Command::Invalid(format!("not a page number: {rest:?}")),
        },
        "r" => Command::Send(Intent::Reload),
        "o" if !rest.is_empty() => Command::Send(Intent::Select(JobId::new(rest))),
        "x" => Command::Send(Intent::Dismiss),
        "h" | "?" => Command::Help,
        "q" | "quit" => Command::Quit,
        other => Command::Invalid(format!("unknown command: {other}")),
    };
    Some(command)
}

fn draw(vm: &ViewModel, clock: &SystemTimeProvider) {
    println!();
    println!(
        "{} search={:?} location={}",
        "filters:".dimmed(),
        vm.search_text,
        vm.location.label()
    );
    match &vm.selected_job {
        Some(job) => print!("{}", render::detail(job, clock)),
        None => print!("{}", render::listing(vm, clock)),
    }
}

pub async fn run(endpoint: Arc<dyn ListingEndpoint>, initial: InitialFilters) -> Result<()> {
    let clock = SystemTimeProvider;
    let (session, mut handle) = ListingSession::new(ListingController::new(initial), endpoint);
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let driver = tokio::spawn(session.run(shutdown_rx));

    println!("{}", HELP.dimmed());
    draw(&handle.current(), &clock);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    None => {}
                    Some(Command::Send(intent)) => {
                        debug!(?intent, "Sending intent");
                        handle.send(intent).await?;
                    }
                    Some(Command::Help) => println!("{HELP}"),
                    Some(Command::Quit) => break,
                    Some(Command::Invalid(msg)) => println!("{}", msg.yellow()),
                }
            }
            vm = handle.changed() => draw(&vm?, &clock),
        }
    }

    shutdown_tx.shutdown();
    driver.await??;
    Ok(())
}
