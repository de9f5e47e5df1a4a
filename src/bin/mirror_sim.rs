use aurebesh_core::sync::mirror::shared;
use aurebesh_core::sync::transport::{local_pair, LocalEndpoint};
use aurebesh_core::{
    AccentColor, AppConfig, MemoryStore, MirrorWorker, PreferencesService, SettingsMirror,
};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

// Drives a phone and a watch, each with its own in-memory store, over an
// in-process link. Commands are read line by line from stdin:
//
//   phone|watch color NAME      change the accent color on one side
//   phone|watch digraph on|off  toggle digraphs on one side
//   reach on|off                make the link reachable or not
//   pair on|off                 pair or unpair the devices
//   flush                       send pending changes now
//   show                        print both sides
//   exit

struct Device {
    name: &'static str,
    worker: MirrorWorker,
    endpoint: LocalEndpoint,
}

impl Device {
    fn new(name: &'static str, endpoint: LocalEndpoint, follow_font: bool, config: &AppConfig) -> Self {
        let prefs = PreferencesService::new(Box::new(MemoryStore::new())).follow_digraph_font(follow_font);
        let mirror = SettingsMirror::new(shared(prefs), endpoint.clone(), config.debounce);
        Self { name, worker: MirrorWorker::spawn(mirror), endpoint }
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        let prefs = self.worker.preferences().lock().snapshot();
        writeln!(
            out,
            "{:<6} accent={:<7} digraph={:<5} font={}",
            self.name, prefs.accent_color, prefs.digraph, prefs.font
        )
    }

    /// Moves whatever the link delivered to this device into its mirror.
    fn pump(&self) -> usize {
        let messages = self.endpoint.drain();
        let count = messages.len();
        for message in messages {
            self.worker.deliver(message);
        }
        count
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    let config = AppConfig::from_env();

    let (phone_end, watch_end) = local_pair();
    let link = phone_end.clone();
    let phone = Device::new("phone", phone_end, false, &config);
    let watch = Device::new("watch", watch_end, true, &config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["exit"] => break,
            [side @ ("phone" | "watch"), "color", name] => {
                let device = if *side == "phone" { &phone } else { &watch };
                match name.parse::<AccentColor>() {
                    Ok(color) => {
                        device.worker.update(|p| p.set_accent_color(color));
                    }
                    Err(_) => writeln!(stdout, "unknown color '{}'", name)?,
                }
            }
            [side @ ("phone" | "watch"), "digraph", value] => {
                let device = if *side == "phone" { &phone } else { &watch };
                let on = matches!(*value, "on" | "true" | "1");
                device.worker.update(|p| p.set_digraph(on));
            }
            ["reach", value] => link.set_reachable(*value == "on"),
            ["pair", value] => link.set_paired(*value == "on"),
            ["flush"] => {
                phone.worker.flush();
                watch.worker.flush();
            }
            ["show"] => {
                let delivered = phone.pump() + watch.pump();
                // give both mirror threads a moment to apply what arrived
                thread::sleep(Duration::from_millis(50));
                writeln!(stdout, "delivered {} message(s), {} sent in total", delivered, link.transmissions())?;
                phone.show(&mut stdout)?;
                watch.show(&mut stdout)?;
            }
            [] => {}
            _ => writeln!(stdout, "unknown command: {}", line)?,
        }
        stdout.flush()?;
    }

    phone.worker.shutdown();
    watch.worker.shutdown();
    Ok(())
}
