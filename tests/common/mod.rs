#![allow(dead_code)]

use cashdesk::domain::customer::Customer;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::Error;
use std::path::Path;

const FIRST_NAMES: [&str; 10] = [
    "Leia", "Sadie", "Jose", "Sara", "Frank", "Dewey", "Tomas", "Joel", "Lukas", "Carlos",
];
const LAST_NAMES: [&str; 10] = [
    "Liberty", "Ray", "Harrison", "Ronan", "Drew", "Powell", "Larsen", "Chan", "Anderson", "Lane",
];

/// Random valid customers with ids `first_id..first_id + count`.
pub fn random_customers(first_id: i32, count: usize) -> Vec<Customer> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|offset| {
            let first_name = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Leia");
            let last_name = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Lane");
            Customer::new(
                first_id + offset as i32,
                first_name,
                last_name,
                rng.gen_range(19..90),
            )
        })
        .collect()
}

pub fn write_customers_csv(path: &Path, customers: &[Customer]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["Id", "FirstName", "LastName", "Age"])?;
    for customer in customers {
        wtr.write_record([
            customer.id.to_string(),
            customer.first_name.clone(),
            customer.last_name.clone(),
            customer.age.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn is_sorted_by_name(customers: &[Customer]) -> bool {
    customers
        .windows(2)
        .all(|pair| pair[0].name_order(&pair[1]).is_le())
}
