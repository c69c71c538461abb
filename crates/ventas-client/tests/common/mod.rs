#![allow(dead_code)]

use serde_json::{json, Value};
use ventas_client::{ApiClient, ClientConfig};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-access-token";

/// A mock backend plus a client pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub client: ApiClient,
}

impl TestBackend {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    pub async fn spawn_with(configure: impl FnOnce(&mut ClientConfig)) -> Self {
        let server = MockServer::start().await;

        let mut config = ClientConfig::default();
        config.api.base_url = format!("{}/", server.uri());
        config.auth.token = Some(TEST_TOKEN.to_string());
        configure(&mut config);

        let client = ApiClient::new(&config).expect("Failed to build test client");
        TestBackend { server, client }
    }

    /// Bodies of every request the mock server received, as JSON.
    pub async fn received_json(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }
}

pub fn products_json() -> Value {
    json!([
        {
            "id": 5,
            "codigo": "ACET-500",
            "nombre": "Acetaminofen 500mg",
            "valor_venta": "1000.00",
            "maneja_iva": true,
            "porcentaje_iva": "0.19"
        },
        {
            "id": 6,
            "codigo": "AGUA",
            "nombre": "Agua 600ml",
            "valor_venta": 500,
            "maneja_iva": false,
            "porcentaje_iva": null
        }
    ])
}

pub fn customers_json() -> Value {
    json!([
        {
            "id": 3,
            "cedula": "1020304050",
            "nombre": "Ana Pérez",
            "direccion": "Calle 10 # 4-20",
            "telefono": "3001234567",
            "email": "ana@correo.co"
        }
    ])
}

pub fn sale_record_json(id: i64, customer: i64, fecha: &str, total: &str) -> Value {
    json!({
        "id": id,
        "cliente": customer,
        "fecha": fecha,
        "total": total,
        "detalles": [
            {
                "producto": 5,
                "cantidad": 3,
                "valor_producto": "3000.00",
                "iva_calculado": "570.00"
            }
        ]
    })
}
