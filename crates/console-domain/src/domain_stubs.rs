use crate::contact::{Contact, QsoLine};
use crate::dependency::ServiceDependency;
use crate::errors::{DomainError, Result};
use crate::log::Log;
use crate::service::Service;
use crate::user::User;
use chrono::NaiveDate;
use records::stubs::InMemoryRecordEndpoint;
use records::Record;

pub struct DomainStubs;

impl DomainStubs {
    /// Seis servicios; dos ya tienen posición en el mapa. Ids 1..=6 en este
    /// orden: gateway, auth, orders, billing, inventory, notifications.
    pub fn sample_services() -> Result<InMemoryRecordEndpoint<Service>> {
        let services = vec![Service::new("gateway", 120)?.at(50, 30),
                            Service::new("auth", 80)?,
                            Service::new("orders", 210)?,
                            Service::new("billing", 340)?.at(90, 70),
                            Service::new("inventory", 150)?,
                            Service::new("notifications", 95)?];
        seeded(crate::SERVICES, services)
    }

    /// Dependencias entre los servicios de `sample_services`.
    pub fn sample_dependencies() -> Result<InMemoryRecordEndpoint<ServiceDependency>> {
        let dependencies = vec![ServiceDependency::new(1, 2, Some("authn"))?,
                                ServiceDependency::new(1, 3, Some("routes"))?,
                                ServiceDependency::new(3, 4, Some("charges"))?,
                                ServiceDependency::new(3, 5, Some("reserves"))?,
                                ServiceDependency::new(4, 6, None)?];
        seeded(crate::DEPENDENCIES, dependencies)
    }

    pub fn sample_users() -> Result<InMemoryRecordEndpoint<User>> {
        seeded(crate::USERS, vec![User::new("Ada", "Lovelace", "engine")?, User::new("Alan", "Turing", "bombe")?])
    }

    pub fn sample_contacts() -> Result<InMemoryRecordEndpoint<Contact>> {
        let date = |y, m, d| {
            NaiveDate::from_ymd_opt(y, m, d)
                .ok_or_else(|| DomainError::ValidationError(format!("fecha inválida {}-{}-{}", y, m, d)))
        };
        let contacts = vec![Contact::new(QsoLine { user_id: 1,
                                                   qso_date: date(2024, 3, 9)?,
                                                   qso_time: "18:42",
                                                   callsign: "ea4abc",
                                                   operator_callsign: "dl1xyz",
                                                   band: "20m",
                                                   frequency: "14.074",
                                                   mode: "ft8" })?.with_reports("-10", "-07"),
                            Contact::new(QsoLine { user_id: 2,
                                                   qso_date: date(2024, 3, 10)?,
                                                   qso_time: "07:15",
                                                   callsign: "g4def",
                                                   operator_callsign: "dl1xyz",
                                                   band: "40m",
                                                   frequency: "7.150",
                                                   mode: "ssb" })?.with_reports("59", "57")];
        seeded(crate::CONTACTS, contacts)
    }

    /// Actividad de los usuarios de `sample_users`, desordenada por usuario.
    pub fn sample_logs() -> Result<InMemoryRecordEndpoint<Log>> {
        let logs = vec![Log::new("Alan Turing", "registró un QSO en 40m")?,
                        Log::new("Ada Lovelace", "inició sesión")?,
                        Log::new("Alan Turing", "confirmó el QSO con G4DEF")?];
        seeded(crate::LOGS, logs)
    }
}

fn seeded<T: Record>(name: &str, records: Vec<T>) -> Result<InMemoryRecordEndpoint<T>>
    where T::Id: TryFrom<u64>
{
    let endpoint = InMemoryRecordEndpoint::new(name);
    for record in records {
        endpoint.seed(record)?;
    }
    Ok(endpoint)
}
