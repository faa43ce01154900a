// Streaming search demo client.
//
// Reads queries line by line from stdin, feeds each one to the widget as a
// keystroke would, and streams matching results to the terminal as response
// bytes arrive. A query under the minimum length closes the results panel.

use anyhow::{Context, Result};
use tokio::io::AsyncBufReadExt;
use url::Url;

use searchbox::{ResultSurface, SearchConfig, SearchRecord, SearchWidget};

/// Console rendering surface: one printed line per result row
struct ConsolePanel {
    open: bool,
}

impl ResultSurface for ConsolePanel {
    fn open_panel(&mut self) {
        if !self.open {
            println!("--- results ---");
            self.open = true;
        }
    }

    fn clear_panel(&mut self) {
        self.open = true;
    }

    fn append_rows(&mut self, records: &[SearchRecord]) {
        for record in records {
            println!("{:<12} {} -> {}", record.source, record.title, record.link);
        }
    }

    fn show_no_results(&mut self) {
        println!("(no matches found)");
    }

    fn close_panel(&mut self) {
        if self.open {
            println!("--- closed ---");
            self.open = false;
        }
    }

    fn navigate(&mut self, target: Url) {
        println!("session expired, log in at {target}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let origin: Url = args
        .next()
        .context("usage: searchbox <origin> [csrf-token]")?
        .parse()
        .context("origin must be an absolute URL")?;
    let csrf_token = args.next().unwrap_or_default();

    let config = SearchConfig::builder()
        .origin(origin)
        .csrf_token(csrf_token)
        .build()?;
    let mut widget = SearchWidget::new(config, ConsolePanel { open: false })?;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        widget.on_input(line.trim());
        widget.wait_idle().await;
    }

    Ok(())
}
