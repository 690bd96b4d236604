use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// The dotenv file to source connection settings from
    #[clap(short, long, value_parser, default_value = ".env")]
    pub env_path: String,
}

impl Options {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
