use csv::Writer;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::*;

pub fn process_create_dummy_csv(args: &CreateDummyCsvArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut wtr = Writer::from_path(&args.csv_path)?;

    wtr.write_record(["address", "amount"])?;
    for _ in 0..args.num_records {
        let address = Address::new(rng.gen());
        wtr.write_record([address.to_string(), args.amount.to_string()])?;
    }

    wtr.flush()?;
    println!(
        "wrote {} records to {}",
        args.num_records,
        args.csv_path.display()
    );
    Ok(())
}
