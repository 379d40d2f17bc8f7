use std::sync::Arc;

use certwatch_inspect::{load_certificate, report, Result};
mod args;

fn main() -> Result<()> {
	let opts = args::options().run();

	let issuer = match &opts.issuer {
		Some(path) => Some(Arc::new(load_certificate(path, None)?)),
		None => None,
	};

	for (n, path) in opts.cert.iter().enumerate() {
		let cert = load_certificate(path, issuer.as_ref())?;
		if opts.pin_only {
			println!("{}", cert.hpkp_pin()?);
		} else {
			if n > 0 {
				println!();
			}
			print!("{}", report(&cert)?);
		}
	}

	Ok(())
}
