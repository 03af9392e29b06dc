//! Terminal chat client for the RAG proxy.
//!
//! Run with: cargo run -p chat-widget --bin rag-chat -- --dma Boston

use std::{sync::Arc, time::Duration};

use chat_widget::{
    AssistantReply, ChatWidget, HttpProxyTransport, ProxyTransport, Scope, WidgetError,
    command::Command,
    render::bubble_at,
};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "rag-chat", about = "Ask AI (RAG) from the terminal")]
struct Args {
    /// Base URL of the RAG proxy.
    #[arg(long, env = "RAG_CHAT_PROXY_URL", default_value = "http://localhost:3000")]
    proxy_url: String,

    /// Restrict answers to one designated market area.
    #[arg(long)]
    dma: Option<String>,

    /// Restrict answers to one store chain.
    #[arg(long)]
    store_chain: Option<String>,

    /// Column used to right-align your own messages.
    #[arg(long, default_value_t = 80)]
    width: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never interleave with the transcript.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();

    let args = Args::parse();
    let transport: Arc<dyn ProxyTransport> = Arc::new(HttpProxyTransport::new(&args.proxy_url)?);
    let mut widget = ChatWidget::new(Scope::new(args.dma, args.store_chain));

    println!("{}", "Ask AI (RAG)".bold());
    println!(
        "{}",
        "Ask about the dashboard, metrics, methodology… (Enter to send, :sources N, :quit)".dimmed()
    );

    let (tx, mut rx) = mpsc::channel(1);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut spinner: Option<ProgressBar> = None;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Input is closed; an answer still in flight gets its turn
                    // before exiting.
                    if widget.is_loading() {
                        if let Some(outcome) = rx.recv().await {
                            settle(&mut spinner, &mut widget, outcome, args.width);
                        }
                    }
                    break;
                };
                match Command::parse(&line) {
                    Command::Quit => break,
                    Command::Usage(cmd) => notice(&spinner, &format!("usage: :sources N (got `{cmd}`)")),
                    Command::ToggleSources(index) => match widget.toggle_sources(index) {
                        Some(_) => show(&spinner, &widget, index, args.width),
                        None => notice(&spinner, &format!("turn #{index} has no sources")),
                    },
                    Command::Ask(text) => {
                        // A blank line re-submits a draft kept from a busy submit.
                        if !text.trim().is_empty() {
                            widget.set_draft(text);
                        }
                        if !widget.can_submit() {
                            notice(&spinner, "still thinking; press Enter again once the answer is in");
                            continue;
                        }
                        let Some(request) = widget.begin_submit() else { continue };

                        show(&spinner, &widget, widget.transcript().len() - 1, args.width);
                        spinner = Some(busy_indicator(widget.submit_label()));

                        let transport = transport.clone();
                        let tx = tx.clone();
                        tokio::spawn(async move {
                            let outcome = transport.send(&request).await;
                            let _ = tx.send(outcome).await;
                        });
                    }
                }
            }
            Some(outcome) = rx.recv() => settle(&mut spinner, &mut widget, outcome, args.width),
        }
    }

    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }
    Ok(())
}

/// Stops the spinner and records a finished request in the transcript.
fn settle(
    spinner: &mut Option<ProgressBar>,
    widget: &mut ChatWidget,
    outcome: Result<AssistantReply, WidgetError>,
    width: usize,
) {
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }
    if let Some(index) = widget.finish_submit(outcome) {
        show(spinner, widget, index, width);
    }
}

fn busy_indicator(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style.tick_chars("-\\|/ "));
    }
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn show(spinner: &Option<ProgressBar>, widget: &ChatWidget, index: usize, width: usize) {
    if let Some(bubble) = bubble_at(widget, index) {
        print_line(spinner, &format!("{}\n", bubble.paint(width)));
    }
}

fn notice(spinner: &Option<ProgressBar>, msg: &str) {
    print_line(spinner, &msg.yellow().to_string());
}

fn print_line(spinner: &Option<ProgressBar>, text: &str) {
    match spinner {
        Some(pb) => pb.suspend(|| println!("{text}")),
        None => println!("{text}"),
    }
}
