//! Built-in conference list written to an empty store on first load.

use crate::error::{CatalogError, CatalogErrorExt};
use confhub_domain::ConferenceRecord;

const SEED_JSON: &str = r#"[
  {
    "id": 1,
    "title": "React Brasil 2024",
    "description": "A maior conferência de React do Brasil. Venha aprender as últimas novidades do ecossistema React.",
    "category": "Frontend",
    "date": "2024-03-15",
    "location": "São Paulo, SP",
    "price": 350.0,
    "spaces": 100,
    "image": "/images/react-brasil.jpg"
  },
  {
    "id": 2,
    "title": "TypeScript Conference",
    "description": "Aprenda TypeScript com os melhores especialistas do mercado.",
    "category": "Frontend",
    "date": "2024-04-20",
    "location": "Rio de Janeiro, RJ",
    "price": 280.0,
    "spaces": 50,
    "image": "/images/typescript-conf.jpg"
  },
  {
    "id": 3,
    "title": "DevOps Summit",
    "description": "Descubra as melhores práticas de DevOps e como implementá-las em sua empresa.",
    "category": "DevOps",
    "date": "2024-05-10",
    "location": "Belo Horizonte, MG",
    "price": 450.0,
    "spaces": 75,
    "image": "/images/devops-summit.jpg"
  },
  {
    "id": 4,
    "title": "Rust Latam",
    "description": "Sistemas seguros e rápidos: ownership, async e WebAssembly na prática.",
    "category": "Backend",
    "date": "2024-06-08",
    "location": "Curitiba, PR",
    "price": 500.0,
    "spaces": 60,
    "image": "/images/rust-latam.jpg"
  },
  {
    "id": 5,
    "title": "Node Summit",
    "description": "APIs escaláveis, filas e observabilidade com Node.js.",
    "category": "Backend",
    "date": "2024-06-22",
    "location": "Porto Alegre, RS",
    "price": 300.0,
    "spaces": 80,
    "image": "/images/node-summit.jpg"
  },
  {
    "id": 6,
    "title": "Mobile Dev Day",
    "description": "Flutter, React Native e Kotlin Multiplatform lado a lado.",
    "category": "Mobile",
    "date": "2024-07-13",
    "location": "Recife, PE",
    "price": 0.0,
    "spaces": 120,
    "image": "/images/mobile-dev-day.jpg"
  },
  {
    "id": 7,
    "title": "Data & AI Forum",
    "description": "Engenharia de dados, MLOps e modelos de linguagem em produção.",
    "category": "Data",
    "date": "2024-08-03",
    "location": "São Paulo, SP",
    "price": 800.0,
    "spaces": 40,
    "image": "/images/data-ai-forum.jpg"
  },
  {
    "id": 8,
    "title": "Cloud Native Week",
    "description": "Kubernetes, service mesh e plataformas internas de desenvolvimento.",
    "category": "DevOps",
    "date": "2024-09-14",
    "location": "Florianópolis, SC",
    "price": 650.0,
    "spaces": 0,
    "image": "/images/cloud-native-week.jpg"
  },
  {
    "id": 9,
    "title": "Frontend Day",
    "description": "CSS moderno, acessibilidade e performance na web.",
    "category": "Frontend",
    "date": "2024-10-05",
    "location": "Brasília, DF",
    "price": 0.0,
    "spaces": 200,
    "image": "/images/frontend-day.jpg"
  },
  {
    "id": 10,
    "title": "Security BR",
    "description": "Segurança de aplicações, supply chain e resposta a incidentes.",
    "category": "Security",
    "date": "2024-11-16",
    "location": "Rio de Janeiro, RJ",
    "price": 550.0,
    "spaces": 30,
    "image": "/images/security-br.jpg"
  }
]"#;

/// Returns the built-in conference list.
///
/// # Errors
///
/// Returns [`CatalogError::Serde`] if the embedded list is malformed.
pub fn conferences() -> Result<Vec<ConferenceRecord>, CatalogError> {
    serde_json::from_str(SEED_JSON).context("Parsing the built-in conference list")
}
