use anyhow::{bail, Result};
use std::env;
use tracing::{debug, info};

use guarded_records::logging::{init_logging, LogFormat};
use guarded_records::{
    BankAccount, Describe, HolderFactory, HolderKind, Measurable, Payable, Payment,
    PaymentProcessor, RuleConfig, Shape, ValidationFailure,
};

struct Args {
    scenario: String,
    rules_path: Option<String>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        scenario: "all".to_string(),
        rules_path: None,
        json: false,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--rules" => match iter.next() {
                Some(path) => args.rules_path = Some(path),
                None => bail!("--rules needs a path"),
            },
            "--json" => args.json = true,
            other if other.starts_with("--") => bail!("Unknown flag: {}", other),
            other => args.scenario = other.to_string(),
        }
    }

    Ok(args)
}

fn main() -> Result<()> {
    init_logging(LogFormat::from_env())?;
    let args = parse_args()?;

    let config = match &args.rules_path {
        Some(path) => RuleConfig::from_file(path)?,
        None => RuleConfig::default(),
    };
    info!(?config, "rules loaded");

    let mut factory = HolderFactory::from_config(config)?;
    info!(attributes = factory.rules().count(), "registry ready");
    for def in factory.rules().all() {
        debug!(attr = def.attr.id(), rules = ?def.validation_rules, "guarded field");
    }

    match args.scenario.as_str() {
        "encapsulation" => run_encapsulation(&mut factory, args.json)?,
        "students" => run_students(&mut factory)?,
        "payments" => run_payments()?,
        "shapes" => run_shapes()?,
        "all" => {
            run_encapsulation(&mut factory, args.json)?;
            run_students(&mut factory)?;
            run_payments()?;
            run_shapes()?;
        }
        other => bail!(
            "Unknown scenario: {} (expected encapsulation, students, payments, shapes or all)",
            other
        ),
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Holders created: {} (persons {}, accounts {}, students {})",
        factory.total_created(),
        factory.created(HolderKind::Person),
        factory.created(HolderKind::Account),
        factory.created(HolderKind::Student),
    );

    Ok(())
}

fn show(label: &str, result: Result<impl std::fmt::Display, ValidationFailure>) {
    match result {
        Ok(value) => println!("✓ {}: {}", label, value),
        Err(err) => println!("✗ {} rejected: {}", label, err),
    }
}

fn run_encapsulation(factory: &mut HolderFactory, json: bool) -> Result<()> {
    println!("👤 Person");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let mut person = factory.person("Umar", 23)?;
    println!("Name: {}, Age: {}", person.name(), person.age());

    show("set_age(-5)", person.set_age(-5).map(|_| person.age()));
    println!("Age is still {}", person.age());
    show("set_age(40)", person.set_age(40).map(|_| person.age()));

    println!("\n💳 Bank Account");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let mut account = factory.account("Alice", 5000.0)?;
    println!("Holder: {} ({})", account.holder_name(), account.masked_id());
    println!("Balance: {:.2}", account.balance());

    show("deposit(2000)", account.deposit(2000.0));
    show("withdraw(1000)", account.withdraw(1000.0));
    show("withdraw(10000)", account.withdraw(10000.0));
    println!("Balance: {:.2} (change {:+.2})", account.balance(), account.balance_change());

    if json {
        print_snapshot(&account)?;
    }

    Ok(())
}

fn print_snapshot(account: &BankAccount) -> Result<()> {
    println!("\n{}", serde_json::to_string_pretty(account)?);
    Ok(())
}

fn run_students(factory: &mut HolderFactory) -> Result<()> {
    println!("\n🎓 Students");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut marks: Vec<i64> = vec![90, 80, 70];
    let student = factory.student("Ali", Some(20), &marks)?;
    marks[0] = 0;
    println!("{} scores {:?} (caller's buffer now {:?})", student.name(), student.scores(), marks);

    let improved = student.with_score(95)?;
    println!(
        "Original keeps {} scores, new record has {} (average {:.1})",
        student.scores().len(),
        improved.scores().len(),
        improved.average().unwrap_or(0.0)
    );

    show(
        "student with score 150",
        factory.student("Ali", Some(20), &[150]).map(|s| s.name().to_string()),
    );

    Ok(())
}

fn run_payments() -> Result<()> {
    println!("\n💸 Payments");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let payments = vec![
        Payment::card(1500.0, "1234567812345678")?,
        Payment::upi(500.0, "umar@upi")?,
        Payment::paypal(2500.0, "user@example.com")?,
    ];

    let mut processor = PaymentProcessor::new();
    for receipt in processor.process_all(payments.iter().map(|p| p as &dyn Payable)) {
        println!("✓ {}", receipt);
    }
    println!("Processed {} payments, total {:.2}", processor.processed(), processor.total());

    show("card payment of 0", Payment::card(0.0, "1234").map(|p| p.describe()));
    show("card number 1234", Payment::card(10.0, "1234").map(|p| p.describe()));

    Ok(())
}

fn run_shapes() -> Result<()> {
    println!("\n📏 Shapes");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let shapes = vec![Shape::circle("Blue", 5.0)?, Shape::rectangle("Green", 4.0, 6.0)?];
    for shape in &shapes {
        println!("✓ {}", shape.describe());
    }
    let total: f64 = shapes.iter().map(|s| s.area()).sum();
    println!("Total area: {:.2}", total);

    Ok(())
}
