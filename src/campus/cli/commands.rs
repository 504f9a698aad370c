use super::render::{
    print_messages, print_notice, render_avatars, render_student_detail, render_student_list,
    render_text_list,
};
use super::setup::{
    print_grouped_help, print_help_for_command, print_subcommand_help, AvatarArgs, Cli, Commands,
    CoreCommands, MiscCommands, StudentCommands,
};
use campus::api::ConfigAction;
use campus::avatar::{AvatarSelector, MediaSource};
use campus::controller::LOAD_FAILURE;
use campus::error::{CampusError, Result};
use campus::form::StudentForm;
use campus::init::{initialize, resolve_home, CampusContext};
use campus::model::Avatar;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CAMPUS_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_logging(cli.verbose);

    if let Some(Commands::Misc(MiscCommands::Help { command })) = &cli.command {
        return handle_help(command.clone());
    }
    if let Some(Commands::Misc(MiscCommands::Avatars)) = &cli.command {
        print!("{}", render_avatars());
        return Ok(());
    }

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Core(cmd)) => match cmd {
            CoreCommands::List { search } => handle_list(&mut ctx, search),
            CoreCommands::Search { term } => handle_search(&mut ctx, term.join(" ")),
            CoreCommands::Add {
                name,
                email,
                role,
                avatar,
            } => handle_add(&mut ctx, name, email, role, avatar),
        },
        Some(Commands::Student(cmd)) => match cmd {
            StudentCommands::View { id } => handle_view(&mut ctx, id),
            StudentCommands::Edit {
                id,
                name,
                email,
                role,
                avatar,
                clear_avatar,
            } => handle_edit(&mut ctx, id, EditArgs { name, email, role }, avatar, clear_avatar),
            StudentCommands::Delete { ids, yes } => handle_delete(&mut ctx, ids, yes),
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Init => handle_init(&mut ctx),
            MiscCommands::Config { key, value } => handle_config(&ctx, key, value),
            MiscCommands::Avatars | MiscCommands::Help { .. } => Ok(()),
        },
        None => handle_list(&mut ctx, None),
    }
}

/// Logs go to stderr. `CAMPUS_LOG` wins over `-v`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "campus=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<CampusContext> {
    let home = resolve_home(cli.home.as_deref())?;
    tracing::debug!(home = %home.display(), "using campus home");
    Ok(initialize(&home))
}

/// Open the store and fill the list, the way a screen does when it mounts.
fn mount(ctx: &mut CampusContext) -> Result<()> {
    if ctx.list.load() {
        return Ok(());
    }
    ctx.list.dismiss_notice();
    Err(CampusError::Api(LOAD_FAILURE.to_string()))
}

/// Clears the notice the controller raised for a failure so that only
/// `main` reports it.
fn settle<T>(ctx: &mut CampusContext, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            if let Some(notice) = ctx.list.dismiss_notice() {
                print_notice(&notice);
            }
            Ok(value)
        }
        Err(e) => {
            ctx.list.dismiss_notice();
            Err(e)
        }
    }
}

fn handle_list(ctx: &mut CampusContext, search: Option<String>) -> Result<()> {
    mount(ctx)?;
    if let Some(term) = search {
        ctx.list.set_query(term);
    }
    let visible = ctx.list.visible();
    print!("{}", render_student_list(&visible, &ctx.list.summary()));
    Ok(())
}

fn handle_search(ctx: &mut CampusContext, term: String) -> Result<()> {
    mount(ctx)?;
    let result = ctx.list.api().search_students(&term)?;
    let found: Vec<_> = result.listed_students.iter().collect();
    let summary = format!(
        "{} match{} for \"{}\"",
        found.len(),
        if found.len() == 1 { "" } else { "es" },
        term
    );
    print!("{}", render_student_list(&found, &summary));
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut CampusContext,
    name: String,
    email: String,
    role: Option<String>,
    avatar: AvatarArgs,
) -> Result<()> {
    mount(ctx)?;
    let avatar = if avatar.is_set() {
        Some(select_avatar(ctx, None, &avatar)?)
    } else {
        None
    };
    let form = StudentForm::new(name, email)
        .with_role(role.unwrap_or_else(|| ctx.config.default_role.clone()))
        .with_avatar(avatar);

    let outcome = ctx.list.add(&form);
    let created = settle(ctx, outcome)?;
    print!("{}", render_student_detail(&created));
    Ok(())
}

fn handle_view(ctx: &mut CampusContext, id: i64) -> Result<()> {
    mount(ctx)?;
    let result = ctx.list.api().view_student(id)?;
    for student in &result.listed_students {
        print!("{}", render_student_detail(student));
    }
    Ok(())
}

struct EditArgs {
    name: Option<String>,
    email: Option<String>,
    role: Option<String>,
}

impl EditArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

fn handle_edit(
    ctx: &mut CampusContext,
    id: i64,
    fields: EditArgs,
    avatar: AvatarArgs,
    clear_avatar: bool,
) -> Result<()> {
    mount(ctx)?;
    if fields.is_empty() && !clear_avatar && !avatar.is_set() {
        println!("Nothing to update.");
        return Ok(());
    }
    let current = ctx
        .list
        .find(id)
        .cloned()
        .ok_or(CampusError::StudentNotFound(id))?;

    let avatar = if avatar.is_set() {
        Some(select_avatar(ctx, current.avatar.clone(), &avatar)?)
    } else {
        None
    };

    // Avatar-only edits leave the rest of the record alone.
    let outcome = if fields.is_empty() && (clear_avatar || avatar.is_some()) {
        ctx.list.set_avatar(id, avatar)
    } else {
        let form = StudentForm::new(
            fields.name.unwrap_or(current.name),
            fields.email.unwrap_or(current.email),
        )
        .with_role(fields.role.unwrap_or(current.role))
        .with_avatar(avatar);
        let saved = ctx.list.edit(id, &form);
        match saved {
            Ok(_) if clear_avatar => ctx.list.set_avatar(id, None),
            other => other,
        }
    };

    let updated = settle(ctx, outcome)?;
    print!("{}", render_student_detail(&updated));
    Ok(())
}

fn handle_delete(ctx: &mut CampusContext, ids: Vec<i64>, yes: bool) -> Result<()> {
    mount(ctx)?;

    if !yes {
        let names: Vec<String> = ids
            .iter()
            .filter_map(|id| ctx.list.find(*id))
            .map(|s| format!("{} <{}>", s.name, s.email))
            .collect();
        if !names.is_empty() && !confirm(&names)? {
            println!("Aborted.");
            return Ok(());
        }
    }

    for id in ids {
        let outcome = ctx.list.remove(id);
        settle(ctx, outcome)?;
    }
    println!("{}", ctx.list.summary());
    Ok(())
}

fn handle_init(ctx: &mut CampusContext) -> Result<()> {
    let result = ctx.list.api_mut().init()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &CampusContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.list.api().config(action)?;
    if key.is_none() {
        if let Some(config) = &result.config {
            let lines: Vec<String> = config
                .list_all()
                .into_iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect();
            print!("{}", render_text_list(&lines, "No configuration values."));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_help(command: Option<String>) -> Result<()> {
    match command {
        Some(cmd) => print_help_for_command(&cmd),
        None => print_grouped_help(),
    }
    Ok(())
}

/// Build the avatar for a form from the CLI flags, starting from `current`.
fn select_avatar(
    ctx: &CampusContext,
    current: Option<Avatar>,
    args: &AvatarArgs,
) -> Result<Avatar> {
    let mut selector = AvatarSelector::new(current);

    if let Some(n) = args.avatar {
        selector.pick_default(n)?;
    } else {
        let (source, file) = match (&args.photo, &args.camera) {
            (Some(path), _) => (MediaSource::Gallery, path),
            (None, Some(path)) => (MediaSource::Camera, path),
            (None, None) => return Ok(selector.into_avatar()),
        };
        let mut provider = ctx.media_provider().with_source_file(file);
        if !selector.capture(source, &mut provider)? {
            tracing::debug!(%source, "capture cancelled, keeping avatar");
        }
    }

    Ok(selector.into_avatar())
}

fn confirm(names: &[String]) -> Result<bool> {
    println!("About to delete:");
    for name in names {
        println!("  {}", name);
    }
    print!("Continue? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
