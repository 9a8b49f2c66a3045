use clap::Parser;
use customtex::application::{
    ConfigService, InitService, ListTemplatesService, NewProjectOptions, NewProjectService,
};
use customtex::cli::{format_config, format_rendered, format_template_list, output, Cli, Commands};
use customtex::domain::{NoPrompter, Prompter};
use customtex::error::CustomTexError;
use customtex::infrastructure::{ConfigRepository, ConsolePrompter, FileSystemRepository};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}", output::error(&e.display_with_suggestions()));
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr; CUSTOMTEX_LOG overrides the level chosen by --verbose
fn init_logging(verbose: bool) {
    let default_directive = if verbose { "customtex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CUSTOMTEX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Already initialized is fine
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CustomTexError> {
    let config_dir = cli.config_dir.as_deref();

    match cli.command {
        Some(Commands::Init { reset }) => {
            let repo = FileSystemRepository::locate(config_dir)?;
            println!(
                "{}",
                output::info(&format!(
                    "Setting up configuration directory at {}",
                    repo.root().display()
                ))
            );
            InitService::execute(&repo, reset)?;
            println!(
                "{}",
                output::success(&format!(
                    "Configuration directory ready at {}",
                    repo.root().display()
                ))
            );
            Ok(())
        }
        Some(Commands::New {
            template,
            output_dir,
            set,
            title,
            author,
            date,
            defaults,
            no_prompt,
            no_config,
            overwrite,
            dry_run,
            save_options,
        }) => {
            let repo = FileSystemRepository::discover(config_dir)?;

            let mut options = NewProjectOptions::new(&template, output_dir);
            for (key, value) in [("title", title), ("author", author), ("date", date)] {
                if let Some(value) = value {
                    options.overrides.set(key, value);
                }
            }
            for (key, value) in set {
                options.overrides.set(&key, value);
            }
            options.use_config = !no_config;
            options.use_defaults = defaults;
            options.overwrite = overwrite;
            options.dry_run = dry_run;
            options.save_options = save_options;

            if !dry_run {
                println!(
                    "{}",
                    output::info(&format!(
                        "Creating project in '{}' from template '{}'...",
                        options.output_dir.display(),
                        template
                    ))
                );
            }

            let mut prompter: Box<dyn Prompter> = if no_prompt {
                Box::new(NoPrompter)
            } else {
                Box::new(ConsolePrompter::stdio())
            };

            let outcome = NewProjectService::new(repo).execute(&options, prompter.as_mut())?;

            if dry_run {
                print!("{}", format_rendered(&outcome.rendered));
            } else {
                for path in &outcome.written {
                    println!("  {}", path.display());
                }
                println!(
                    "{}",
                    output::success(&format!(
                        "Project created successfully at '{}'",
                        options.output_dir.display()
                    ))
                );
            }
            Ok(())
        }
        Some(Commands::Config {
            key,
            value,
            list,
            unset,
        }) => {
            let repo = FileSystemRepository::discover(config_dir)?;
            let service = ConfigService::new(repo);

            if list {
                print!("{}", format_config(&service.list()?));
                Ok(())
            } else if let Some(k) = key {
                if unset {
                    if service.unset(&k)? {
                        println!("Removed {}", k);
                    } else {
                        println!("{} was not set", k);
                    }
                    Ok(())
                } else if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(())
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(())
                }
            } else {
                println!("Usage: customtex config [--list | <key> [<value>] | --unset <key>]");
                Ok(())
            }
        }
        Some(Commands::List) => {
            let repo = FileSystemRepository::discover(config_dir)?;
            let templates = ListTemplatesService::new(repo).execute()?;
            print!("{}", format_template_list(&templates));
            if templates.is_empty() {
                println!();
            }
            Ok(())
        }
        None => {
            println!("customtex - Generate LaTeX projects from templates");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
