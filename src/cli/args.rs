use std::ffi::OsString;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "predict-diabetes",
    about = "Predict diabetes (1) or no diabetes (0) from eight clinical measurements",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Eight numeric feature values
    #[arg(value_name = "VALUE", trailing_var_arg = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

impl CliArgs {
    /// Parse a full argv (program name first). Every token after the program
    /// name is a value, including `--` and anything that looks like a flag.
    pub fn try_from_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let bin = argv
            .next()
            .unwrap_or_else(|| OsString::from("predict-diabetes"));
        // clap consumes the first `--` as its escape; everything after it is positional.
        let escaped = [bin, OsString::from("--")].into_iter().chain(argv);
        Self::try_parse_from(escaped)
    }
}
