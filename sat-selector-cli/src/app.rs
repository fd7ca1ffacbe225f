///! Interactive picker on top of the satellite selector

use std::cell::Cell;
use std::fmt::Write as _;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use sat_selector::module::satdata::julian_to_datetime;
use sat_selector::{CatalogNumber, Column, SatSelector, SatelliteRecord};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::command::{Command, HELP};

/// Reply to one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub struct App {
    selector: SatSelector,
    last_activated: Rc<Cell<Option<CatalogNumber>>>,
}

impl App {
    pub fn new(mut selector: SatSelector) -> Self {
        let last_activated = Rc::new(Cell::new(None));

        let sink = last_activated.clone();
        selector.connect_activated(move |catalog_number| {
            tracing::info!("Satellite {} selected", catalog_number);
            sink.set(Some(catalog_number));
        });

        Self {
            selector,
            last_activated,
        }
    }

    pub fn selector(&self) -> &SatSelector {
        &self.selector
    }

    /// Catalog number of the most recent activation
    pub fn last_activated(&self) -> Option<CatalogNumber> {
        self.last_activated.get()
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Groups => Reply::text(self.groups()),
            Command::Group(index) => match self.selector.select_category(index) {
                Ok(()) => Reply::text(format!(
                    "{} ({} satellites)",
                    self.selector.active_category().name(),
                    self.selector.active_category().len()
                )),
                Err(e) => Reply::text(e.to_string()),
            },
            Command::List => Reply::text(self.list()),
            Command::Search(text) => Reply::text(self.search(&text)),
            Command::Pick(row) => {
                let view = self.selector.surface_mut();
                match view.highlight(row - 1).map(|r| r.name.clone()) {
                    Some(name) => Reply::text(format!("> {}", name)),
                    None => Reply::text(format!(
                        "No row {}, the list has {} rows",
                        row,
                        view.visible_len()
                    )),
                }
            }
            Command::Activate => match self.selector.activate_record() {
                Some(catalog_number) => Reply::text(format!("Selected {}", catalog_number)),
                None => Reply::text("Nothing highlighted"),
            },
            Command::Info => match self.selector.get_selected() {
                Some(record) => Reply::text(info(record, Utc::now())),
                None => Reply::text("Nothing highlighted"),
            },
            Command::Json => match self.selector.get_selected() {
                Some(record) => match serde_json::to_string_pretty(record) {
                    Ok(json) => Reply::text(json),
                    Err(e) => {
                        tracing::error!(
                            "Failed to encode satellite {}: {}",
                            record.catalog_number,
                            e
                        );
                        Reply::text("Failed to encode satellite")
                    }
                },
                None => Reply::text("Nothing highlighted"),
            },
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply {
                output: String::new(),
                quit: true,
            },
            Command::Invalid { command, reason } => {
                Reply::text(format!("Invalid {} command: {}", command, reason))
            }
            Command::Unknown(line) => {
                tracing::debug!("Unknown command: {}", line);
                Reply::text(format!("Unknown command {:?}\n{}", line, HELP))
            }
        }
    }

    fn groups(&self) -> String {
        let active = self.selector.active_index();
        let mut out = String::new();
        for (index, table) in self.selector.tables().iter().enumerate() {
            let marker = if index == active { '*' } else { ' ' };
            let _ = writeln!(out, "{} {:>3}  {} ({})", marker, index, table.name(), table.len());
        }
        out.trim_end().to_string()
    }

    fn list(&self) -> String {
        let view = self.selector.surface();
        if view.visible_len() == 0 {
            return if view.search().is_empty() {
                "No satellites".to_string()
            } else {
                format!("No satellites match {:?}", view.search())
            };
        }

        let widths: Vec<usize> = view
            .visible_columns()
            .iter()
            .map(|c| match c {
                Column::Name => 28,
                Column::CatalogNumber => 8,
                Column::Epoch => 14,
            })
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "{}", line("     ", &view.headers(), &widths));
        for (position, row) in view.render().iter().enumerate() {
            let prefix = format!("{}{:>3} ", if row.highlighted { '>' } else { ' ' }, position + 1);
            let _ = writeln!(out, "{}", line(&prefix, &row.cells, &widths));
        }
        out.trim_end().to_string()
    }

    fn search(&mut self, text: &str) -> String {
        let view = self.selector.surface_mut();
        view.set_search(text);

        if view.search().is_empty() {
            return format!("Showing all {} satellites", view.visible_len());
        }
        if view.visible_len() > 0 {
            return match view.highlighted() {
                Some(record) => format!("{} matches, > {}", view.visible_len(), record.name),
                None => format!("{} matches", view.visible_len()),
            };
        }
        match view.suggest(text) {
            Some(name) => format!("No match for {:?}. Did you mean {:?}?", text, name),
            None => format!("No match for {:?}", text),
        }
    }
}

fn line<S: AsRef<str>>(prefix: &str, cells: &[S], widths: &[usize]) -> String {
    let mut out = prefix.to_string();
    for (cell, width) in cells.iter().zip(widths) {
        let _ = write!(out, "{:<width$} ", cell.as_ref(), width = width);
    }
    out.trim_end().to_string()
}

/// Record details, with the epoch age counted from `now`
fn info(record: &SatelliteRecord, now: DateTime<Utc>) -> String {
    let utc = match julian_to_datetime(record.epoch) {
        Some(epoch) => {
            let age = now.signed_duration_since(epoch);
            format!(
                "{} ({:.1} days old)",
                epoch.format("%Y-%m-%d %H:%M:%S UTC"),
                age.num_seconds() as f64 / 86_400.0
            )
        }
        None => "out of range".to_string(),
    };
    format!(
        "Name:    {}\nCatnum:  {}\nEpoch:   {:.8} JD\n         {}",
        record.name, record.catalog_number, record.epoch, utc
    )
}

/// Read commands line by line until `quit` or end of input
pub async fn run<R, W>(app: &mut App, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        let reply = app.handle(command);
        if !reply.output.is_empty() {
            output.write_all(reply.output.as_bytes()).await?;
            output.write_all(b"\n").await?;
            output.flush().await?;
        }
        if reply.quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sat_selector::{CategoryTable, ColumnFlags, ListView};

    fn app() -> App {
        let all: CategoryTable = vec![
            SatelliteRecord::new("NOAA 19", 33591, 2458999.0),
            SatelliteRecord::new("ISS", 25544, 2459000.5),
            SatelliteRecord::new("AO-91", 43017, 2459215.75),
        ]
        .into_iter()
        .collect();
        let selector = SatSelector::from_tables(ColumnFlags::DEFAULT, vec![all], ListView::new());
        App::new(selector)
    }

    fn run_line(app: &mut App, line: &str) -> Reply {
        app.handle(Command::parse(line).unwrap())
    }

    #[test]
    fn test_list_is_sorted_and_numbered() {
        let mut app = app();
        let out = run_line(&mut app, "list").output;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Available Satellites"));
        assert!(lines[1].starts_with("   1 AO-91"));
        assert!(lines[2].contains("ISS"));
        assert!(lines[2].contains("2459000.5000"));
        assert!(lines[3].contains("NOAA 19"));
    }

    #[test]
    fn test_pick_then_activate() {
        let mut app = app();
        assert_eq!(run_line(&mut app, "activate").output, "Nothing highlighted");
        assert_eq!(app.last_activated(), None);

        assert_eq!(run_line(&mut app, "pick 2").output, "> ISS");
        assert_eq!(run_line(&mut app, "activate").output, "Selected 25544");
        assert_eq!(app.last_activated(), Some(25544));

        assert!(run_line(&mut app, "pick 9").output.starts_with("No row 9"));
    }

    #[test]
    fn test_info_and_json() {
        let mut app = app();
        run_line(&mut app, "pick 2");

        let info = run_line(&mut app, "info").output;
        assert!(info.contains("25544"));
        assert!(info.contains("2020-05-31 00:00:00 UTC"));

        let json: serde_json::Value =
            serde_json::from_str(&run_line(&mut app, "json").output).unwrap();
        assert_eq!(json["catalog_number"], 25544);
        assert_eq!(json["name"], "ISS");
    }

    #[test]
    fn test_info_reports_epoch_age() {
        let record = SatelliteRecord::new("ISS", 25544, 2459000.5);
        let now = DateTime::parse_from_rfc3339("2020-06-03T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let text = info(&record, now);
        assert!(text.contains("2020-05-31 00:00:00 UTC (3.5 days old)"), "{}", text);
    }

    #[test]
    fn test_search_and_suggestion() {
        let mut app = app();
        assert_eq!(run_line(&mut app, "search iss").output, "1 matches, > ISS");
        assert_eq!(app.selector().get_selected().map(|r| r.catalog_number), Some(25544));

        let out = run_line(&mut app, "search NOAA19").output;
        assert_eq!(out, "No match for \"NOAA19\". Did you mean \"NOAA 19\"?");
        assert_eq!(run_line(&mut app, "list").output, "No satellites match \"NOAA19\"");

        assert_eq!(run_line(&mut app, "search").output, "Showing all 3 satellites");
    }

    #[test]
    fn test_groups_and_bad_group() {
        let mut app = app();
        assert_eq!(run_line(&mut app, "groups").output, "*   0  All satellites (3)");
        assert_eq!(
            run_line(&mut app, "group 4").output,
            "category index 4 out of range (1 categories)"
        );
        assert!(run_line(&mut app, "fly").output.contains("Commands:"));
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let mut app = app();
        let input: &[u8] = b"pick 1\n\nactivate\nquit\npick 2\n";
        let mut output = Vec::new();

        run(&mut app, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "> AO-91\nSelected 43017\n");
        assert_eq!(app.last_activated(), Some(43017));
    }
}
