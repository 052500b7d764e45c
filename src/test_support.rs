use crate::models::Catalog;
use serde_json::json;

/// Two-category catalog used across module tests.
pub(crate) fn auth_admin_catalog() -> Catalog {
    serde_json::from_value(auth_admin_document()).unwrap()
}

pub(crate) fn auth_admin_document() -> serde_json::Value {
    json!({
        "baseUrl": "http://localhost:3000/api",
        "categories": [
            {
                "name": "Auth",
                "description": "Session endpoints",
                "endpoints": [
                    {"method": "POST", "path": "/login", "description": "Login", "requiresAuth": false,
                     "body": {"email": "admin@clinic.test", "password": "secret"}}
                ]
            },
            {
                "name": "Admin",
                "description": "Dashboard endpoints",
                "endpoints": [
                    {"method": "GET", "path": "/stats", "description": "Get stats", "requiresAuth": true,
                     "roles": ["admin"], "response": {"doctors": 12, "appointments": 340}}
                ]
            }
        ]
    })
}

/// Larger catalog with an empty category and mixed verbs.
pub(crate) fn booking_catalog() -> Catalog {
    serde_json::from_value(json!({
        "baseUrl": "https://booking.example.com/api",
        "categories": [
            {
                "name": "Doctors",
                "description": "Doctor directory",
                "endpoints": [
                    {"method": "GET", "path": "/doctors", "description": "List doctors", "requiresAuth": false,
                     "queryParams": {"specialty": "cardiology", "page": 1}},
                    {"method": "POST", "path": "/doctors", "description": "Create doctor", "requiresAuth": true,
                     "roles": ["admin"], "body": {"name": "Dr. Grey", "specialty": "surgery"}},
                    {"method": "DELETE", "path": "/doctors/:id", "description": "Remove doctor", "requiresAuth": true}
                ]
            },
            {
                "name": "Reports",
                "description": "Not yet documented",
                "endpoints": []
            },
            {
                "name": "Appointments",
                "description": "Booking flow",
                "endpoints": [
                    {"method": "GET", "path": "/appointments", "description": "List appointments", "requiresAuth": true},
                    {"method": "PATCH", "path": "/appointments/:id", "description": "Reschedule", "requiresAuth": true,
                     "body": {"slot": "2026-11-02T09:30:00Z"}}
                ]
            }
        ]
    }))
    .unwrap()
}
