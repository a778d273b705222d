use anyhow::{Context, ensure};
use argh::FromArgs;
use mota_common::{
    address::Address,
    amount::Amount,
    network::{MtNetwork, NetworkParams},
    or_env::OrEnvExt as _,
};
use mota_payment_uri::MotaUri;
use rust_decimal::Decimal;
use tracing::debug;

/// Parse and build MotaCoin payment URIs
#[derive(Debug, PartialEq, Eq, FromArgs)]
pub struct UriArgs {
    /// optional: the MotaCoin network that addresses must belong to.
    ///
    /// Options: ["mainnet", "testnet"].
    /// Default: "mainnet".
    /// Env: `NETWORK`.
    #[argh(option)]
    pub network: Option<MtNetwork>,

    #[argh(subcommand)]
    pub cmd: UriCommand,
}

#[derive(Debug, PartialEq, Eq, FromArgs)]
#[argh(subcommand)]
pub enum UriCommand {
    Parse(ParseCommand),
    Build(BuildCommand),
}

/// Parse a payment URI and print its fields
#[derive(Debug, PartialEq, Eq, FromArgs)]
#[argh(subcommand, name = "parse")]
pub struct ParseCommand {
    /// the payment URI, e.g. "motaoin:PKf1...?amount=12.34"
    #[argh(positional)]
    pub uri: String,

    /// print the parsed fields as JSON
    #[argh(switch)]
    pub json: bool,
}

/// Build a payment URI
#[derive(Debug, PartialEq, Eq, FromArgs)]
#[argh(subcommand, name = "build")]
pub struct BuildCommand {
    /// the base58 address to pay
    #[argh(option)]
    pub address: String,

    /// the amount to request, in coins, e.g. "12.34"
    #[argh(option)]
    pub amount: Option<Decimal>,

    /// the payee label
    #[argh(option)]
    pub label: Option<String>,

    /// the payment note
    #[argh(option)]
    pub message: Option<String>,
}

// -- impl UriArgs -- //

impl UriArgs {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut args = argh::from_env::<Self>();

        // Fill from env vars if they're set
        args.network.or_env_mut("NETWORK")?;

        Ok(args)
    }

    /// The selected network, defaulting to mainnet.
    pub fn network(&self) -> MtNetwork {
        self.network.unwrap_or(MtNetwork::Mainnet)
    }

    /// Run the command, returning the text to print to stdout.
    pub fn run(self) -> anyhow::Result<String> {
        let params = self.network().params();
        match self.cmd {
            UriCommand::Parse(cmd) => cmd.run(params),
            UriCommand::Build(cmd) => cmd.run(params),
        }
    }
}

impl ParseCommand {
    fn run(self, params: &NetworkParams) -> anyhow::Result<String> {
        let uri = MotaUri::parse(params, &self.uri)
            .context("Failed to parse payment URI")?;
        debug!(network = %params.network, "Parsed payment URI");

        if self.json {
            serde_json::to_string_pretty(&uri)
                .context("Failed to serialize payment URI")
        } else {
            Ok(uri.to_string())
        }
    }
}

impl BuildCommand {
    fn run(self, params: &NetworkParams) -> anyhow::Result<String> {
        let address = Address::from_base58(params, &self.address)
            .with_context(|| format!("Invalid address '{}'", self.address))?;

        let amount = self
            .amount
            .map(Amount::try_from_coins)
            .transpose()
            .context("Invalid amount")?;
        if let Some(amount) = amount {
            ensure!(
                amount <= params.max_money,
                "Amount exceeds the {} maximum of {} coins",
                params.network,
                params.max_money.coins(),
            );
        }

        let uri = mota_payment_uri::build(
            params,
            &address,
            amount,
            self.label.as_deref(),
            self.message.as_deref(),
        );
        debug!(network = %params.network, "Built payment URI");
        Ok(uri)
    }
}
