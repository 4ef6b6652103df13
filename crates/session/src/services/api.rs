//! Workout plan API client

use crate::auth::{AuthInterceptor, AuthService};
use crate::error::Result;
use fitcoach_http::{ApiMessage, ClientError, HttpClient, WorkoutPlan};
use reqwest::{Method, RequestBuilder};
use std::rc::Rc;

/// API client whose requests all pass through the [`AuthInterceptor`]
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: HttpClient,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    /// Create a client for the configured API base URL
    pub fn new(auth: Rc<AuthService>) -> Result<Self> {
        let interceptor = AuthInterceptor::new(auth);
        let http = HttpClient::new(interceptor.api_base_url())?;
        Ok(Self { http, interceptor })
    }

    /// Create a request builder relative to the API base URL
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, path)
    }

    /// Build, intercept and send a request
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let request = self.interceptor.intercept(request.build()?);
        self.http.send(request).await
    }

    pub async fn get_workout_plan(&self, plan_id: &str) -> Result<WorkoutPlan, ClientError> {
        let request = self.request(Method::GET, &format!("/workout-plans/{plan_id}"));
        self.execute(request).await
    }

    pub async fn delete_workout_plan(&self, plan_id: &str) -> Result<ApiMessage, ClientError> {
        let request = self.request(Method::DELETE, &format!("/workout-plans/{plan_id}"));
        self.execute(request).await
    }

    pub async fn delete_exercise(&self, exercise_id: &str) -> Result<ApiMessage, ClientError> {
        let request = self
            .request(Method::DELETE, "/exercises")
            .query(&[("id", exercise_id)]);
        self.execute(request).await
    }
}
