use anyhow::Context;
use dialoguer::theme::ColorfulTheme;
use log::{info, LevelFilter};
use pettracer::{logger, Client, DeviceInfo};

fn prompt_password(username: &str) -> String {
    dialoguer::Password::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Enter password for `{username}`"))
        .allow_empty_password(false)
        .report(false)
        .interact()
        .unwrap()
}

fn main() -> anyhow::Result<()> {
    let level = match dotenv::var("PETTRACER_DEBUG") {
        Ok(flag) if flag == "1" || flag.eq_ignore_ascii_case("true") => LevelFilter::Debug,
        _ => LevelFilter::Info,
    };
    logger::init(level).context("couldn't initialize logger")?;

    let username =
        dotenv::var("PETTRACER_USERNAME").context("missing env var PETTRACER_USERNAME")?;
    let password = match dotenv::var("PETTRACER_PASSWORD") {
        Ok(password) => password,
        Err(_) => prompt_password(&username),
    };

    let mut client = Client::new();
    let login = client.login(&username, &password)?.clone();
    info!(
        "logged in as {} ({} devices on account)",
        login.name.as_deref().unwrap_or("?"),
        login.device_count.unwrap_or(0),
    );

    let devices = client.device_list()?;
    info!("fetched {} device(s)", devices.len());

    for device in &devices {
        let name = device
            .details
            .as_ref()
            .and_then(|details| details.name.as_deref())
            .unwrap_or("unnamed");
        println!("{:>8}  {name}", device.id);
        println!("          battery: {:?} mV, status: {:?}", device.bat, device.status);
        if let Some(contact) = device.last_contact {
            println!("          last contact: {contact}");
        }
        if let Some(pos) = &device.last_pos {
            println!(
                "          last position: {:?}, {:?} at {:?} ({:?} sats)",
                pos.pos_lat, pos.pos_long, pos.time_measure, pos.sat
            );
        }

        // Detail call exercises the per-device facade.
        let handle = client.device(device.id)?;
        let mode = match handle.info()? {
            DeviceInfo::One(info) => info.mode,
            DeviceInfo::Many(infos) => infos.first().and_then(|info| info.mode),
        };
        println!("          mode: {mode:?}");
    }

    Ok(())
}
