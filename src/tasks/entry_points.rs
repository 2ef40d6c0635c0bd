/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::cmd::{self, FitArgs, OutputFormat};
use crate::config::{Settings, YamlRead};
use crate::input::Source;
use crate::ui::logging::GlobalLogger;

use clap::{App, Arg, ArgMatches};
use lupfit_polyfit::FitError;
use std::ffi::OsStr;
use std::fs::File;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        // the logger may not exist yet if setting it up is what failed
        let have_logger = ::log::max_level() != ::log::LevelFilter::Off;
        for cause in e.iter_chain() {
            match have_logger {
                true => error!("{}", cause),
                false => eprintln!("error: {}", cause),
            }
        }

        if ::std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        }

        let code = e.downcast_ref::<FitError>().map(FitError::code).unwrap_or(1);
        ::std::process::exit(code);
    });
}

fn app() -> App<'static, 'static> {
    App::new("lupfit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Least squares polynomial fit of two-column data.")
        .args(&[
            Arg::with_name("input")
                .required(true)
                .value_name("INPUT")
                .help("file of 'x y' lines, or '-' for stdin"),
            Arg::with_name("degree")
                .short("d").long("degree")
                .takes_value(true).value_name("DEGREE")
                .help("polynomial degree [default: 1, or the config value]"),
            Arg::with_name("config")
                .short("c").long("config")
                .takes_value(true).value_name("CONFIG")
                .help("settings yaml"),
            Arg::with_name("pivot_tol")
                .long("pivot-tol")
                .takes_value(true).value_name("TOL")
                .help("reject LU pivots smaller than this [default: 1e-12]"),
            Arg::with_name("json")
                .long("json")
                .help("print coefficients and r-squared as JSON"),
            Arg::with_name("verbose")
                .short("v").long("verbose")
                .multiple(true)
                .help("more logging"),
            Arg::with_name("quiet")
                .short("q").long("quiet")
                .conflicts_with("verbose")
                .help("only log warnings and errors"),
            Arg::with_name("log")
                .long("log")
                .takes_value(true).value_name("FILE")
                .help("also write the log to this file"),
            Arg::with_name("no_color")
                .long("no-color")
                .help("disable colored log levels"),
        ])
}

fn resolve_args(m: &ArgMatches<'_>) -> FailResult<FitArgs> {
    let mut settings = match m.value_of("config") {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format_err!("could not open config '{}': {}", path, e))?;
            Settings::from_reader(file)?
        },
        None => Settings::default(),
    };

    if let Some(degree) = m.value_of("degree") {
        settings.degree = degree.parse()
            .map_err(|_| format_err!("invalid degree '{}': expected a non-negative integer", degree))?;
    }
    if let Some(tol) = m.value_of("pivot_tol") {
        settings.pivot_tolerance = tol.parse()
            .map_err(|_| format_err!("invalid pivot tolerance '{}'", tol))?;
    }

    Ok(FitArgs {
        input: Source::from_arg(m.value_of("input").unwrap_or("-")),
        settings: settings.validate()?,
        format: match m.is_present("json") {
            true => OutputFormat::Json,
            false => OutputFormat::Lines,
        },
    })
}

pub fn lupfit() {
    wrap_result_main(|| {
        let matches = app().get_matches();

        let mut logger = GlobalLogger::default();
        logger.color(!matches.is_present("no_color"));
        match matches.is_present("quiet") {
            true => logger.verbosity(-1),
            false => logger.verbosity(matches.occurrences_of("verbose") as i32),
        };
        if let Some(path) = matches.value_of_os("log") {
            logger.path(path);
        }
        logger.apply()?;

        let args = resolve_args(&matches)?;
        debug!("{:?}", args);

        let stdout = ::std::io::stdout();
        let mut out = stdout.lock();
        cmd::run_fit(&args, &mut out)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches<'static> {
        app().get_matches_from_safe(args.iter().cloned()).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let args = resolve_args(&matches(&["lupfit", "-d", "3", "--pivot-tol", "1e-10", "--json", "data.txt"])).unwrap();
        assert_eq!(args.settings.degree, 3);
        assert_eq!(args.settings.pivot_tolerance, 1e-10);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.input, Source::File("data.txt".into()));
    }

    #[test]
    fn defaults() {
        let args = resolve_args(&matches(&["lupfit", "-"])).unwrap();
        assert_eq!(args.settings.degree, 1);
        assert_eq!(args.format, OutputFormat::Lines);
        assert_eq!(args.input, Source::Stdin);
    }

    #[test]
    fn bad_values() {
        assert!(resolve_args(&matches(&["lupfit", "-d", "1.5", "x"])).is_err());
        assert!(resolve_args(&matches(&["lupfit", "-d", "two", "x"])).is_err());
        assert!(resolve_args(&matches(&["lupfit", "--pivot-tol", "0", "x"])).is_err());
    }
}
