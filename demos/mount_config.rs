#[macro_use]
extern crate log;

use std::path::PathBuf;

use argh::FromArgs;
use vfs_smb_options::{resolve_option, MountOptions, PropertyMap, SmbContext};

#[derive(FromArgs)]
#[argh(description = "
Resolve a JSON SMB options document and print the resulting client configuration.

The document is a JSON object keyed by external option names, e.g.
{{\"smb:client.connectionTimeout\": 5000, \"smb:minVersion\": \"SMB210\"}}

Please, report issues to <https://github.com/veeso/vfs-smb-options>")]
struct Args {
    #[argh(positional, description = "path to a JSON options document")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    assert!(env_logger::builder().try_init().is_ok());
    let args: Args = argh::from_env();

    let document: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&args.config)?)?;

    // resolve each entry and stage everything into one property map
    let mut properties = PropertyMap::new();
    for (name, value) in &document {
        let option = resolve_option(name, value)?;
        info!("resolved option {}", option);
        option.stage(&mut properties);
    }

    info!("building context from {} properties", properties.len());
    let context = SmbContext::new(properties)?;

    let mut options = MountOptions::default();
    options.set_smb_context(context);

    let context = options
        .smb_context()
        .expect("context was attached right above");
    println!("{:#?}", context.config());

    Ok(())
}
