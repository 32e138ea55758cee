//! Drive a validator session against the built-in simulator, or a real
//! validator on a serial port.
//!
//! Usage:
//!   cargo run -p id003 --example validator
//!   cargo run -p id003 --example validator --features serial -- /dev/ttyUSB0

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use id003::prelude::*;
use id003::transport::Transport;

const TICK: Duration = Duration::from_millis(10);

fn run<T: Transport + 'static>(transport: T, device: &str, demo: bool) -> anyhow::Result<()> {
    let config = SessionConfig::new(SerialConfig::new(device), "USD", ms(5000));
    let start = Instant::now();
    let (mut session, events) = Session::new(config, transport, start);
    session
        .connect(start)
        .with_context(|| format!("opening {}", device))?;
    session.monitor_heartbeat(start);

    let mut inserted = false;
    loop {
        let now = Instant::now();
        session.tick(now);

        for event in events.try_iter() {
            match event {
                Event::Connected(Ok(())) => {
                    println!(
                        "ready: version={:?} lowest={:?}",
                        session.version(),
                        session.lowest_bill()
                    );
                    session.enable(now);
                }
                Event::Connected(Err(e)) => return Err(e).context("bootstrap"),
                Event::BillRead {
                    denomination,
                    hex_code,
                    ..
                } => {
                    println!("bill read: {} ({})", denomination, hex_code);
                    session.stack(now);
                }
                Event::BillStacked { .. } => {
                    println!("bill stacked");
                    if demo {
                        session.disable(now);
                        session.close(now)?;
                        return Ok(());
                    }
                }
                Event::BillRejected(r) => println!("bill rejected: {:?}", r.reason),
                Event::Error(e) if e.is_fatal() => return Err(e).context("session"),
                other => println!("event: {}", other.name()),
            }
        }

        if demo && !inserted && session.state() == State::Enable {
            inserted = true;
            insert_demo_bill(&mut session);
        }

        thread::sleep(TICK);
    }
}

fn insert_demo_bill<T: Transport + 'static>(session: &mut Session<T>) {
    // only the simulator accepts a scripted insert
    let any: &mut dyn std::any::Any = session.transport_mut();
    if let Some(sim) = any.downcast_mut::<Simulator>() {
        println!("inserting a 5 dollar bill");
        sim.insert(0x63);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match std::env::args().nth(1) {
        #[cfg(feature = "serial")]
        Some(device) => {
            let transport = id003::transport::SerialTransport::new(SerialConfig::new(&device));
            run(transport, &device, false)
        }
        #[cfg(not(feature = "serial"))]
        Some(_) => anyhow::bail!("serial support needs --features serial"),
        None => run(Simulator::new(), "simulator", true),
    }
}
