use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use log::{error, info};

use courier::protocol::{
    Endpoint, PORT, RECORD_COMMAND, STRING_COMMAND, TransportError, client, handle_record,
    handle_string,
};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Connect to an endpoint at this address; listens for connections when absent
    #[arg(long)]
    connect: Option<IpAddr>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.connect {
        Some(ip) => {
            if let Err(e) = client::run(SocketAddr::new(ip, PORT)) {
                error!("{e}");
            }
            info!("client done");
        }
        None => {
            ctrlc::set_handler(|| {
                info!("interrupted, shutting down");
                std::process::exit(0);
            })
            .expect("failed to install interrupt handler");

            if let Err(e) = server() {
                error!("{e}");
            }
            info!("server done");
        }
    }
}

fn server() -> Result<(), TransportError> {
    let endpoint = Endpoint::new(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), PORT));
    endpoint.register(STRING_COMMAND, handle_string);
    endpoint.register(RECORD_COMMAND, handle_record);
    endpoint.listen()
}
