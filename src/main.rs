mod settings;

use canvas::{CanvasSession, Point, ScreenRect};
use console_domain::{DependencyField, DomainStubs, Log, LogField, Service, ServiceDependency, ServiceField};
use records::{PageRequest, PaginatedQuery, QueryConfig, RecordClient, RecordEndpoint, Sort, SortField, SortOrder};
use settings::Settings;
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Tamaño (en píxeles) de la superficie del mapa.
const MAP_WIDTH: f64 = 800.0;
const MAP_HEIGHT: f64 = 600.0;
/// El mapa carga hasta 100 servicios y dependencias.
const MAP_PAGE_SIZE: u32 = 100;

type Services<E> = Arc<RecordClient<Service, E>>;
type ServiceMap = CanvasSession<Service, ServiceDependency>;

/// Menú interactivo de la consola de servicios.
///
/// Con `CONSOLE_DEMO=1` usa colecciones en memoria; si no, la API REST de
/// `CONSOLE_API_URL`. `RUST_LOG` controla el nivel de log.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::from_env()?;
    if settings.demo {
        log::info!("modo demo: colecciones en memoria");
        let services = Arc::new(RecordClient::new(Arc::new(DomainStubs::sample_services()?)));
        let dependencies = RecordClient::new(Arc::new(DomainStubs::sample_dependencies()?));
        let logs = RecordClient::new(Arc::new(DomainStubs::sample_logs()?));
        run(services, dependencies, logs, settings.page_size).await
    } else {
        let services =
            Arc::new(RecordClient::new(Arc::new(records_rest::new_from_env::<Service>(console_domain::SERVICES,
                                                                                     "Servicios")?)));
        let dependencies =
            RecordClient::new(Arc::new(records_rest::new_from_env::<ServiceDependency>(console_domain::DEPENDENCIES,
                                                                                       "Dependencias")?));
        let logs = RecordClient::new(Arc::new(records_rest::new_from_env::<Log>(console_domain::LOGS, "Actividad")?));
        run(services, dependencies, logs, settings.page_size).await
    }
}

async fn run<E, F, G>(services: Services<E>,
                      dependencies: RecordClient<ServiceDependency, F>,
                      logs: RecordClient<Log, G>,
                      page_size: u32)
                      -> Result<(), Box<dyn Error>>
    where E: RecordEndpoint<Service> + 'static,
          F: RecordEndpoint<ServiceDependency> + 'static,
          G: RecordEndpoint<Log> + 'static
{
    let config = QueryConfig::new(Sort::asc(ServiceField::Name), 0).with_page_size(page_size);
    let mut query = PaginatedQuery::for_client(Arc::clone(&services), config)?;
    let mut map: ServiceMap = CanvasSession::new(ScreenRect::new(MAP_WIDTH, MAP_HEIGHT)?);
    wait_and_show(&mut query).await;

    loop {
        println!("\n== Consola de servicios ==");
        println!("1) Ver página actual");
        println!("2) Página siguiente");
        println!("3) Página anterior");
        println!("4) Cambiar orden");
        println!("5) Crear servicio");
        println!("6) Eliminar servicio");
        println!("7) Ver mapa de servicios");
        println!("8) Mover servicio en el mapa");
        println!("9) Zoom");
        println!("10) Encuadrar mapa");
        println!("11) Guardar posiciones");
        println!("12) Descartar cambios de posición");
        println!("13) Ver actividad");
        println!("14) Salir");
        let choice = prompt("Elige una opción: ")?;

        match choice.trim() {
            "1" => {
                drain(&mut query);
                show_current(&query);
            }
            "2" => {
                drain(&mut query);
                query.request_page(query.current_request().page() + 1);
                wait_and_show(&mut query).await;
            }
            "3" => {
                let page = query.current_request().page();
                if page == 0 {
                    println!("Ya estás en la primera página");
                    continue;
                }
                drain(&mut query);
                query.request_page(page - 1);
                wait_and_show(&mut query).await;
            }
            "4" => {
                let field = match prompt("Campo (nombre/p99/id): ")?.trim() {
                    "nombre" | "" => ServiceField::Name,
                    "p99" => ServiceField::P99Millis,
                    "id" => ServiceField::Id,
                    other => {
                        eprintln!("Campo desconocido: {}", other);
                        continue;
                    }
                };
                let order = match prompt("Sentido (asc/desc): ")?.trim() {
                    "desc" => SortOrder::Desc,
                    _ => SortOrder::Asc,
                };
                drain(&mut query);
                query.set_sort(Sort { property: field, order });
                wait_and_show(&mut query).await;
            }
            "5" => {
                let name = prompt("Nombre: ")?;
                let Some(p99) = parse_number::<i32>(&prompt("p99 (ms): ")?) else {
                    continue;
                };
                let draft = match Service::new(&name, p99) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };
                drain(&mut query);
                match services.create(&draft).await {
                    Ok(created) => {
                        println!("Servicio creado: {:?}", created.id);
                        wait_and_show(&mut query).await;
                    }
                    Err(e) => eprintln!("Error creando servicio: {}", e),
                }
            }
            "6" => {
                let Some(id) = parse_number::<i64>(&prompt("Id del servicio a eliminar: ")?) else {
                    continue;
                };
                let confirm = prompt(&format!("Confirma borrado de {}? escribir 'yes' para confirmar: ", id))?;
                if confirm.trim().to_lowercase() != "yes" {
                    println!("Borrado cancelado");
                    continue;
                }
                drain(&mut query);
                match services.delete(&id).await {
                    Ok(()) => {
                        println!("Servicio eliminado: {}", id);
                        wait_and_show(&mut query).await;
                    }
                    Err(e) => eprintln!("Error eliminando servicio: {}", e),
                }
            }
            "7" => {
                if map.has_changes() {
                    println!("(hay cambios sin guardar; se muestra el mapa actual)");
                } else if let Err(e) = load_map(&mut map, &*services, &dependencies).await {
                    eprintln!("Error cargando el mapa: {}", e);
                    continue;
                }
                show_map(&map);
            }
            "8" => {
                let Some(id) = parse_number::<i64>(&prompt("Id del servicio: ")?) else {
                    continue;
                };
                let Some(dx) = parse_number::<f64>(&prompt("Desplazamiento horizontal (px): ")?) else {
                    continue;
                };
                let Some(dy) = parse_number::<f64>(&prompt("Desplazamiento vertical (px): ")?) else {
                    continue;
                };
                let Some(start) = map.node(&id).map(|n| map.viewport().model_to_screen(n.position(), &map.screen()))
                else {
                    eprintln!("El servicio {} no está en el mapa (usa la opción 7)", id);
                    continue;
                };
                if let Err(e) = map.pointer_down_on_node(&id, start) {
                    eprintln!("{}", e);
                    continue;
                }
                map.pointer_move(Point::new(start.x + dx, start.y + dy));
                map.pointer_up();
                show_map(&map);
            }
            "9" => {
                let Some(delta) = parse_number::<f64>(&prompt("Delta de rueda (negativo acerca): ")?) else {
                    continue;
                };
                let center = Point::new(MAP_WIDTH / 2.0, MAP_HEIGHT / 2.0);
                if map.wheel(delta, center) {
                    println!("viewBox: {}", map.viewport());
                } else {
                    println!("Zoom fuera de límites; la vista no cambia");
                }
            }
            "10" => {
                println!("viewBox: {}", map.fit_to_content());
            }
            "11" => {
                if !map.has_changes() {
                    println!("No hay cambios que guardar");
                    continue;
                }
                let report = map.save(&*services).await;
                println!("Guardados: {:?}", report.saved);
                for (id, e) in &report.failed {
                    eprintln!("No se pudo guardar {}: {}", id, e);
                }
            }
            "12" => {
                map.reset();
                show_map(&map);
            }
            "13" => {
                let request = match PageRequest::new(0, page_size, Some(Sort::asc(LogField::User))) {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };
                match logs.get_paged_detail(&request).await {
                    Ok(page) => show_logs(&page.items),
                    Err(e) => eprintln!("Error cargando la actividad: {}", e),
                }
            }
            "14" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    query.close();
    Ok(())
}

async fn load_map<E, F>(map: &mut ServiceMap,
                        services: &RecordClient<Service, E>,
                        dependencies: &RecordClient<ServiceDependency, F>)
                        -> canvas::Result<()>
    where E: RecordEndpoint<Service> + 'static,
          F: RecordEndpoint<ServiceDependency> + 'static
{
    let request = PageRequest::new(0, MAP_PAGE_SIZE, Some(Sort::asc(ServiceField::Name)))?;
    let link_request = PageRequest::new(0, MAP_PAGE_SIZE, Some(Sort::asc(DependencyField::Name)))?;
    map.load(services, dependencies, &request, &link_request).await
}

/// Descarta eventos ya entregados (informando de los errores) para que el
/// siguiente `next` corresponda al disparo que viene.
fn drain(query: &mut PaginatedQuery<Service>) {
    while let Some(event) = query.try_next() {
        if let Err(e) = event {
            eprintln!("Error refrescando servicios: {}", e);
        }
    }
}

async fn wait_and_show(query: &mut PaginatedQuery<Service>) {
    match query.next().await {
        Some(Ok(_)) => show_current(query),
        Some(Err(e)) => {
            eprintln!("Error cargando servicios: {}", e);
            show_current(query);
        }
        None => eprintln!("El pipeline de servicios se cerró"),
    }
}

fn show_current(query: &PaginatedQuery<Service>) {
    let Some(page) = query.current_page() else {
        println!("(sin datos todavía)");
        return;
    };
    let sort = page.request
                   .sort()
                   .map(|s| format!("{} {}", s.property.as_str(), s.order.as_str()))
                   .unwrap_or_else(|| "-".into());
    println!("\nPágina {} (tamaño {}, orden {})", page.request.page(), page.request.size(), sort);
    println!("ID     | P99 (ms) | POSICIÓN   | NOMBRE");
    println!("----------------------------------------------");
    for s in &page.items {
        let id = s.id.map(|i| i.to_string()).unwrap_or_else(|| "-".into());
        let position = match (s.x, s.y) {
            (Some(x), Some(y)) => format!("{},{}", x, y),
            _ => "-".into(),
        };
        println!("{:<6} | {:>8} | {:<10} | {}", id, s.p99_millis, position, s.name);
    }
    if page.is_empty() {
        println!("(página vacía)");
    }
}

fn show_map(map: &ServiceMap) {
    println!("\nviewBox: {}", map.viewport());
    for node in map.nodes() {
        let id = node.record.id.map(|i| i.to_string()).unwrap_or_else(|| "-".into());
        let dirty = if node.has_unsaved_change() { " *" } else { "" };
        println!("[{}] {} @ ({:.1}, {:.1}){}", id, node.record.name, node.x, node.y, dirty);
    }
    for c in map.connections() {
        println!("  ({:.1}, {:.1}) -> ({:.1}, {:.1}) {}",
                 c.x1,
                 c.y1,
                 c.x2,
                 c.y2,
                 c.label.as_deref().unwrap_or(""));
    }
    if map.has_changes() {
        println!("Cambios sin guardar: {:?}", map.dirty_ids());
    }
}

fn show_logs(entries: &[Log]) {
    println!("\nUSUARIO              | DESCRIPCIÓN");
    println!("----------------------------------------------");
    for entry in entries {
        println!("{:<20} | {}", entry.user, entry.description);
    }
    if entries.is_empty() {
        println!("(sin actividad)");
    }
}

fn parse_number<N: std::str::FromStr>(raw: &str) -> Option<N> {
    match raw.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            eprintln!("Número inválido: {}", raw.trim());
            None
        }
    }
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
