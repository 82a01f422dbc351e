use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use ratatui::layout::{Constraint, Layout};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use m9s::action::Action;
use m9s::app::{App, Effect, InputMode, Overlay};
use m9s::client::{HttpMailClient, MailServerClient};
use m9s::config::{Cli, ConfigFile};
use m9s::event::{key_to_action, AppEvent, Buffers, RawEventHandler};
use m9s::widgets;
use m9s::worker::{CliHandle, CliRequest, CliWorker};

#[tokio::main]
async fn main() -> Result<()> {
    m9s::tui::install_hooks()?;
    dotenvy::dotenv().ok();

    let mut cli = Cli::parse();
    if let Some(file) = ConfigFile::load() {
        file.merge_into(&mut cli);
    }

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.log_file.as_deref())?;

    run_tui(cli).await
}

fn init_logging(log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let Some(log_file) = log_file else {
        return Ok(None);
    };
    let file = std::fs::File::create(log_file)
        .wrap_err_with(|| format!("cannot open log file {}", log_file))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    Ok(Some(guard))
}

async fn run_tui(cli: Cli) -> Result<()> {
    let initial = cli
        .initial_params()
        .map_err(|e| eyre!("invalid --link: {}", e))?;

    let client = HttpMailClient::new(&cli.base_url, cli.timeout())
        .wrap_err_with(|| format!("cannot use mail server API at {}", cli.base_url))?;
    let client: Arc<dyn MailServerClient> = Arc::new(client);

    let mut app = App::new(cli.base_url.clone());

    // Set up channels
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let (worker, cli_handle) = CliWorker::new(client, action_tx);
    tokio::spawn(worker.run());

    // Initial data load
    let effects = app.mount(initial);
    handle_effects(effects, &cli_handle);

    let mut terminal = m9s::tui::init()?;
    let mut events = RawEventHandler::new(Duration::from_secs(1));

    loop {
        terminal.draw(|frame| render(&mut app, frame))?;

        tokio::select! {
            Some(event) = events.next() => {
                let action = match event {
                    AppEvent::Key(key) => {
                        let buffers = Buffers {
                            command: &app.input_buffer,
                            filter: match app.input_mode {
                                InputMode::Filter(field) => app.filter_value(field),
                                _ => "",
                            },
                            date: &app.date_draft,
                        };
                        key_to_action(key, &app.input_mode, &app.overlay, buffers)
                    }
                    AppEvent::Tick => Some(Action::Tick),
                };
                if let Some(action) = action {
                    let effects = app.update(action);
                    handle_effects(effects, &cli_handle);
                }
            }
            Some(action) = action_rx.recv() => {
                let effects = app.update(action);
                handle_effects(effects, &cli_handle);
            }
        }

        if app.should_quit {
            break;
        }
    }

    m9s::tui::restore()?;

    // Leave the final view behind as a shareable link
    println!("{}", app.link());
    Ok(())
}

fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();

    frame.render_widget(
        ratatui::widgets::Block::default()
            .style(ratatui::style::Style::default().bg(m9s::theme::BG_DARK)),
        area,
    );

    let [header, top_pager, filter_bar, table, bottom_pager, footer, status] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

    widgets::header::render(app, frame, header);
    widgets::paginator::render(app, frame, top_pager);
    widgets::filter_bar::render(app, frame, filter_bar);
    widgets::mail_table::render(app, frame, table);
    widgets::paginator::render(app, frame, bottom_pager);

    if app.input_mode == InputMode::Command {
        widgets::command_input::render(app, frame, footer);
        widgets::command_input::render_suggestions(app, frame, status);
    } else {
        widgets::footer::render(app, frame, footer);
        widgets::status_bar::render(app, frame, status);
    }

    match app.overlay.clone() {
        Overlay::Help => widgets::help_overlay::render(frame, area),
        Overlay::Confirm(confirm) => widgets::confirm_modal::render(&confirm, frame, area),
        Overlay::Selector(target) => widgets::selector::render(app, target, frame, area),
        Overlay::DateRange => widgets::date_range_picker::render(app, frame, area),
        Overlay::None => {}
    }

    widgets::error_toast::render(app, frame, area);
}

fn handle_effects(effects: Vec<Effect>, cli_handle: &CliHandle) {
    for effect in effects {
        match effect {
            Effect::Fetch(params) => {
                tracing::info!(query = %params.to_query_string(), "fetch requested");
                cli_handle.send(CliRequest::FetchMails { params });
            }
            Effect::RestartMail(id) => {
                cli_handle.send(CliRequest::RestartMail { id });
            }
            Effect::Quit => {}
        }
    }
}
