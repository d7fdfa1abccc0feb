use env_logger::Env;
use villa_booking::{BookingError, Cli};

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));

    if let Err(e) = Cli::run() {
        match e.downcast_ref::<BookingError>() {
            Some(booking) => eprintln!("{booking}"),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}
