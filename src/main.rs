//! clinicdesk command line: a minimal view over the register.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use clinicdesk::config;
use clinicdesk::store::export::write_export;
use clinicdesk::{HospitalStore, SqliteKvStore};

#[derive(Debug, Parser)]
#[command(name = "clinicdesk")]
#[command(about = "Hospital front-desk register: patients, doctors, appointments, bills")]
struct Cli {
    /// Directory holding the register database and exports.
    #[arg(long, env = "CLINICDESK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "CLINICDESK_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a collection, optionally filtered.
    List {
        kind: Kind,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Write a collection to CSV.
    Export {
        kind: Kind,
        /// Output directory (defaults to <data-dir>/exports).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Delete a record. Patients and doctors take their appointments and
    /// bills with them.
    Remove {
        kind: Kind,
        id: u64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
    /// Show dashboard counters.
    Stats,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    #[value(alias = "patient")]
    Patients,
    #[value(alias = "doctor")]
    Doctors,
    #[value(alias = "appointment")]
    Appointments,
    #[value(alias = "bill")]
    Bills,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    clinicdesk::init_tracing(cli.log_level.as_deref());

    let data_dir = cli.data_dir.unwrap_or_else(config::app_data_dir);
    let db_path = config::database_path(&data_dir);
    info!(path = %db_path.display(), "Opening register");
    let mut store = HospitalStore::open(SqliteKvStore::open(&db_path)?)?;

    match cli.command {
        Command::List { kind, search } => list(&store, kind, &search),
        Command::Export { kind, out } => {
            let (csv, file_name) = match kind {
                Kind::Patients => (store.export_patients()?, config::PATIENTS_CSV),
                Kind::Doctors => (store.export_doctors()?, config::DOCTORS_CSV),
                Kind::Appointments => (store.export_appointments()?, config::APPOINTMENTS_CSV),
                Kind::Bills => (store.export_bills()?, config::BILLS_CSV),
            };
            let dir = out.unwrap_or_else(|| config::exports_dir(&data_dir));
            let path = write_export(&dir, file_name, &csv)?;
            println!("{}", path.display());
        }
        Command::Remove { kind, id, yes } => {
            if !yes {
                anyhow::bail!("Refusing to delete {kind:?} {id} without --yes");
            }
            match kind {
                Kind::Patients => store.remove_patient(id)?,
                Kind::Doctors => store.remove_doctor(id)?,
                Kind::Appointments => store.remove_appointment(id)?,
                Kind::Bills => store.remove_bill(id)?,
            }
            println!("Deleted {kind:?} {id}");
        }
        Command::Stats => {
            let stats = store.stats();
            println!("Patients:      {}", stats.patients);
            println!("Doctors:       {}", stats.doctors);
            println!("Appointments:  {}", stats.appointments);
            println!("Bills:         {}", stats.bills);
            println!("Outstanding:   {:.2}", stats.outstanding_amount);
        }
    }

    Ok(())
}

fn list(store: &HospitalStore<SqliteKvStore>, kind: Kind, search: &str) {
    let rows: Vec<String> = match kind {
        Kind::Patients => store
            .search_patients(search)
            .into_iter()
            .map(|p| {
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    p.id,
                    p.name,
                    p.age,
                    p.gender,
                    p.contact,
                    p.blood.map_or("-", |b| b.as_str())
                )
            })
            .collect(),
        Kind::Doctors => store
            .search_doctors(search)
            .into_iter()
            .map(|d| format!("{}\t{}\t{}\t{}\t{}", d.id, d.name, d.specialization, d.contact, d.email))
            .collect(),
        Kind::Appointments => store
            .search_appointments(search)
            .into_iter()
            .map(|a| {
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    a.id,
                    store.patient_name(a.patient_id),
                    store.doctor_name(a.doctor_id),
                    a.date,
                    a.time.format("%H:%M"),
                    a.status
                )
            })
            .collect(),
        Kind::Bills => store
            .search_bills(search)
            .into_iter()
            .map(|b| {
                format!(
                    "{}\t{}\t{}\t{:.2}\t{}\t{}",
                    b.id,
                    store.patient_name(b.patient_id),
                    store.doctor_name(b.doctor_id),
                    b.amount,
                    b.status,
                    b.date
                )
            })
            .collect(),
    };

    if rows.is_empty() {
        println!("No records found");
        return;
    }
    for row in rows {
        println!("{row}");
    }
}
