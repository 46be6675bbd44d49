use std::{
    fs,
    io::{self, Read},
    process,
};

use clap::{App, Arg, ArgMatches, SubCommand};

use grammar_table_transcriber::{
    render_first_follow, render_parse_table, transcribe_first_follow, transcribe_parse_table,
    Config, OutputFormat,
};

fn read_input(matches: &ArgMatches) -> Result<String, String> {
    match matches.value_of("input") {
        Some(file_name) => fs::read_to_string(file_name)
            .map_err(|e| format!("Couldn't read {} : {}", file_name, e)),
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .map_err(|e| format!("Couldn't read stdin : {}", e))?;
            Ok(s)
        }
    }
}

fn read_config(matches: &ArgMatches) -> Result<Config, String> {
    match matches.value_of("config") {
        Some(file_name) => {
            let s = fs::read_to_string(file_name)
                .map_err(|e| format!("Couldn't read {} : {}", file_name, e))?;
            Config::from_json(&s).map_err(|e| format!("{} : {}", file_name, e))
        }
        None => Ok(Config::default()),
    }
}

fn run(name: &str, matches: &ArgMatches) -> Result<String, String> {
    let verbose = matches.is_present("verbose");
    let format: OutputFormat = matches.value_of("format").unwrap_or("rust").parse()?;
    let config = read_config(matches)?;
    let input = read_input(matches)?;

    if verbose {
        eprintln!("read {} bytes", input.len());
    }

    if name == "first-follow" {
        let table = transcribe_first_follow(&input, &config).map_err(|e| e.to_string())?;
        if verbose {
            eprintln!("{} nonterminals", table.len());
        }
        render_first_follow(&table, format, &config).map_err(|e| e.to_string())
    } else {
        let table = transcribe_parse_table(&input, &config).map_err(|e| e.to_string())?;
        if verbose {
            eprintln!("{} parse table entries", table.len());
        }
        render_parse_table(&table, format, &config).map_err(|e| e.to_string())
    }
}

fn with_common_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("input")
            .help("The rendered table document (stdin if omitted)")
            .index(1),
    )
    .arg(
        Arg::with_name("format")
            .short("f")
            .long("format")
            .takes_value(true)
            .possible_values(&["rust", "plain", "latex", "json"])
            .help("Output format"),
    )
    .arg(
        Arg::with_name("config")
            .short("c")
            .long("config")
            .takes_value(true)
            .help("JSON configuration file"),
    )
    .arg(
        Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("Print progress to stderr"),
    )
}

fn main() {
    let matches = App::new("grammar-table-transcriber")
        .version("0.1.0")
        .about("Turns rendered First/Follow and LL(1) tables into parser table literals")
        .subcommand(with_common_args(
            SubCommand::with_name("first-follow").about("Transcribes a First/Follow set table"),
        ))
        .subcommand(with_common_args(
            SubCommand::with_name("ll1").about("Transcribes an LL(1) parse table"),
        ))
        .get_matches();

    let (name, sub) = match matches.subcommand() {
        (name, Some(sub)) => (name, sub),
        _ => {
            eprintln!("{}", matches.usage());
            process::exit(1);
        }
    };

    match run(name, sub) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
