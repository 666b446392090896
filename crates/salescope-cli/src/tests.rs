use super::*;

#[test]
fn parses_db_ping_command() {
    let cli =
        Cli::try_parse_from(["salescope-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["salescope-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn parses_db_seed_without_url() {
    let cli =
        Cli::try_parse_from(["salescope-cli", "db", "seed"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { url: None }
        })
    ));
}

#[test]
fn parses_db_seed_with_url_override() {
    let cli = Cli::try_parse_from([
        "salescope-cli",
        "db",
        "seed",
        "--url",
        "http://localhost:8080/dump.json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Seed { url: Some(ref u) }
        }) if u == "http://localhost:8080/dump.json"
    ));
}

#[test]
fn parses_report_command() {
    let cli = Cli::try_parse_from(["salescope-cli", "report", "--month", "Mar", "--year", "2022"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Report { ref month, ref year }) if month == "Mar" && year == "2022"
    ));
}

#[test]
fn report_requires_month_and_year() {
    assert!(Cli::try_parse_from(["salescope-cli", "report", "--month", "Mar"]).is_err());
    assert!(Cli::try_parse_from(["salescope-cli", "report", "--year", "2022"]).is_err());
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["salescope-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn unknown_db_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["salescope-cli", "db", "drop"]).is_err());
}
