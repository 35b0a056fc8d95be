//! Dispatch from parsed arguments to the API, and printing of the results.

use super::render::{render_detail, render_listing, render_messages, render_text_list};
use super::setup::{Cli, Commands, LinkAction, ModuleAction, NoteAction, QuestionAction};
use clap::Parser;
use log::LevelFilter;
use std::io::{IsTerminal, Read};
use terminus::api::{CmdResult, ConfigAction, LinkInput};
use terminus::error::{Result, TerminusError};
use terminus::init::{initialize, TerminusContext};
use terminus::model::ContentKind;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize(cli.data_dir.as_deref())?;

    let outcome = match cli.command {
        Some(Commands::Module { action }) => handle_module(&mut ctx, action),
        Some(Commands::Note { module, action }) => handle_note(&mut ctx, &module, action),
        Some(Commands::Question { module, action }) => handle_question(&mut ctx, &module, action),
        Some(Commands::Link { module, action }) => handle_link(&mut ctx, &module, action),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_module(&mut ctx, ModuleAction::List),
    };

    // Flush whatever did succeed, even when the command itself failed
    let flushed = ctx.api.shutdown();
    outcome.and(flushed)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn print_result(result: &CmdResult) {
    if !result.listed.is_empty() {
        print!("{}", render_listing(&result.listed));
    }
    if let Some(detail) = &result.detail {
        print!("{}", render_detail(detail));
    }
    print!("{}", render_messages(&result.messages));
}

fn handle_module(ctx: &mut TerminusContext, action: ModuleAction) -> Result<()> {
    let result = match action {
        ModuleAction::Add { name } => ctx.api.add_module(&name)?,
        ModuleAction::Delete { module } => ctx.api.delete_module(&module)?,
        ModuleAction::Rename { module, new_name } => ctx.api.rename_module(&module, &new_name)?,
        ModuleAction::List => ctx.api.list_modules()?,
    };
    print_result(&result);
    Ok(())
}

fn handle_note(ctx: &mut TerminusContext, module: &str, action: NoteAction) -> Result<()> {
    let result = match action {
        NoteAction::Add { name, data } => {
            let data = match data {
                Some(data) => data,
                None => read_stdin()?,
            };
            ctx.api.add_note(module, &name, &data)?
        }
        NoteAction::Edit { index, data } => ctx.api.edit_note(module, index, &data)?,
        NoteAction::View { index } => ctx.api.view(ContentKind::Note, module, index)?,
        NoteAction::Delete { index } => ctx.api.delete(ContentKind::Note, module, index)?,
    };
    print_result(&result);
    Ok(())
}

fn handle_question(ctx: &mut TerminusContext, module: &str, action: QuestionAction) -> Result<()> {
    let result = match action {
        QuestionAction::Add { question, answer } => ctx.api.add_question(module, &question, &answer)?,
        QuestionAction::View { index } => ctx.api.view(ContentKind::Question, module, index)?,
        QuestionAction::Delete { index } => ctx.api.delete(ContentKind::Question, module, index)?,
    };
    print_result(&result);
    Ok(())
}

fn handle_link(ctx: &mut TerminusContext, module: &str, action: LinkAction) -> Result<()> {
    let result = match action {
        LinkAction::Add {
            description,
            day,
            time,
            url,
        } => {
            let input = LinkInput {
                description,
                day,
                start_time: time,
                url,
            };
            ctx.api.add_link(module, &input)?
        }
        LinkAction::View { index } => ctx.api.view(ContentKind::Link, module, index)?,
        LinkAction::Delete { index } => ctx.api.delete(ContentKind::Link, module, index)?,
    };
    print_result(&result);
    Ok(())
}

fn handle_config(ctx: &TerminusContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if key.is_none() {
        let mut lines = vec![format!("data-dir = {}", ctx.data_dir.display())];
        lines.extend(
            result
                .config
                .iter()
                .flat_map(|c| c.list_all())
                .map(|(k, v)| format!("{} = {}", k, v)),
        );
        print!("{}", render_text_list(&lines, "No configuration values."));
    }
    print!("{}", render_messages(&result.messages));
    Ok(())
}

/// Note body from piped input.
fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(TerminusError::InvalidArgument(
            "Note body missing: pass it as an argument or pipe it in".to_string(),
        ));
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer)
}
