/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Long-form content behind each project detail page.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use super::project::{PROJECT_ID_IMSOP, PROJECT_ID_SAP_BTP_AI_HUB};

pub(crate) const PROJECT_ID_AZURE_SMART_GUARDIAN: &str = "azure-smart-guardian";

static PROJECT_DETAILS: OnceLock<ProjectDetailRegistry> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureItem {
    pub title: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechStackGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub architecture: Vec<ArchitectureItem>,
    pub tech_stack: Vec<TechStackGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImplementationPhase {
    pub phase: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetail {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub stats: Vec<ProjectStat>,
    pub problem_statement: String,
    pub requirements: Vec<String>,
    pub solution: Solution,
    pub implementation: Vec<ImplementationPhase>,
    pub results: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectDetailRegistry {
    details: BTreeMap<String, ProjectDetail>,
}

impl ProjectDetailRegistry {
    pub fn core_seed() -> Self {
        let details = [
            (PROJECT_ID_IMSOP, imsop()),
            (PROJECT_ID_SAP_BTP_AI_HUB, sap_btp_ai_hub()),
            (PROJECT_ID_AZURE_SMART_GUARDIAN, azure_smart_guardian()),
        ]
        .into_iter()
        .map(|(id, detail)| (id.to_string(), detail))
        .collect();
        Self { details }
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ProjectDetail> {
        self.details.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.details.keys().map(String::as_str)
    }

    /// Replace or add the detail for `id`.
    pub fn insert(&mut self, id: impl Into<String>, detail: ProjectDetail) {
        self.details.insert(id.into(), detail);
    }

    pub fn remove(&mut self, id: &str) -> Option<ProjectDetail> {
        self.details.remove(id)
    }
}

pub fn project_details() -> &'static ProjectDetailRegistry {
    PROJECT_DETAILS.get_or_init(ProjectDetailRegistry::core_seed)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

fn stats(pairs: &[(&str, &str)]) -> Vec<ProjectStat> {
    pairs
        .iter()
        .map(|(label, value)| ProjectStat {
            label: (*label).to_string(),
            value: (*value).to_string(),
        })
        .collect()
}

fn architecture(pairs: &[(&str, &str)]) -> Vec<ArchitectureItem> {
    pairs
        .iter()
        .map(|(title, desc)| ArchitectureItem {
            title: (*title).to_string(),
            desc: (*desc).to_string(),
        })
        .collect()
}

fn tech_stack(groups: &[(&str, &[&str])]) -> Vec<TechStackGroup> {
    groups
        .iter()
        .map(|(category, items)| TechStackGroup {
            category: (*category).to_string(),
            items: strings(items),
        })
        .collect()
}

fn phases(rows: &[(&str, &str, &str)]) -> Vec<ImplementationPhase> {
    rows.iter()
        .map(|(phase, duration, description)| ImplementationPhase {
            phase: (*phase).to_string(),
            duration: (*duration).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

fn imsop() -> ProjectDetail {
    ProjectDetail {
        title: "IMSOP".to_string(),
        subtitle: "Intelligent Multi-Cloud Supply Chain & Operations Platform".to_string(),
        description: "An enterprise-grade, cloud-native platform designed for real-time supply \
                      chain visibility, predictive analytics, and intelligent automation. Built \
                      with domain-driven design principles across seven bounded contexts, \
                      serving 10M+ requests per day with 99.99% uptime SLA."
            .to_string(),
        stats: stats(&[
            ("Daily Requests", "10M+"),
            ("Uptime SLA", "99.99%"),
            ("Cost Reduction", "35%"),
        ]),
        problem_statement: "The organization faced critical challenges in managing legacy \
                            monolithic systems that couldn't scale with growing demand. Peak \
                            traffic loads exceeding 5M requests per day caused frequent outages \
                            and high operational costs."
            .to_string(),
        requirements: strings(&[
            "Handle 10M+ requests per day with sub-100ms latency",
            "Achieve 99.99% uptime SLA across multiple regions",
            "Reduce infrastructure costs by 30-40%",
            "Support multi-cloud strategy (Azure + AWS)",
        ]),
        solution: Solution {
            architecture: architecture(&[
                ("Identity", "OAuth 2.0, RBAC, managed identities"),
                ("Ingestion", "REST APIs, Kafka streams, WebSockets"),
                ("Operations", "Shipment tracking, state machines"),
                ("Analytics", "Data processing, ML model inference"),
                ("Prediction", "Delay prediction, demand forecasting"),
                ("AI Assistant", "Natural language chatbot"),
                ("Reporting", "GraphQL API, real-time dashboards"),
            ]),
            tech_stack: tech_stack(&[
                ("Backend", &[".NET Core 8", "Python 3.11", "FastAPI", "GraphQL"]),
                ("Data", &["PostgreSQL", "Azure SQL", "MongoDB", "Redis"]),
                (
                    "Infrastructure",
                    &["Kubernetes (AKS)", "Docker", "Terraform", "Azure Bicep"],
                ),
                (
                    "DevOps",
                    &["Azure DevOps", "GitHub Actions", "ELK Stack", "Prometheus"],
                ),
            ]),
        },
        implementation: phases(&[
            (
                "Foundation",
                "Weeks 1-4",
                "Set up cloud infrastructure, establish CI/CD pipelines, and deploy initial \
                 microservices framework.",
            ),
            (
                "Core Services",
                "Weeks 5-12",
                "Develop and deploy core business services with event-driven communication \
                 using Azure Service Bus.",
            ),
            (
                "Optimization",
                "Weeks 13-16",
                "Integrate all services, optimize performance, and implement distributed \
                 tracing with App Insights.",
            ),
            (
                "Production",
                "Weeks 17-20",
                "Deploy to production, implement security hardening, and establish operational \
                 procedures.",
            ),
        ]),
        results: strings(&[
            "10M+ requests per day with sub-100ms latency",
            "99.99% uptime SLA across all services",
            "35% infrastructure cost reduction",
            "Deployment time reduced from weeks to hours",
        ]),
    }
}

fn sap_btp_ai_hub() -> ProjectDetail {
    ProjectDetail {
        title: "SAP BTP AI Learning Hub".to_string(),
        subtitle: "Enterprise AI Education Platform".to_string(),
        description: "An interactive, comprehensive learning platform designed for mastering AI \
                      business solutions on SAP Business Technology Platform (BTP). The platform \
                      provides hands-on tutorials, best practices, and resources for developers, \
                      architects, and business professionals."
            .to_string(),
        stats: stats(&[
            ("Tutorials", "6+"),
            ("Learning Paths", "3"),
            ("Interactive Tools", "4+"),
        ]),
        problem_statement: "Organizations face significant challenges in adopting AI solutions \
                            on SAP BTP due to a lack of comprehensive, hands-on learning \
                            resources and a steep learning curve for services like SAP AI Core \
                            and Generative AI Hub."
            .to_string(),
        requirements: strings(&[
            "Provide comprehensive tutorials for all skill levels",
            "Create interactive playground for LLM experimentation",
            "Enable hands-on learning with code and diagrams",
            "Deliver production-ready, responsive user interface",
        ]),
        solution: Solution {
            architecture: architecture(&[
                ("Frontend", "React 19 with TypeScript"),
                ("Styling", "Tailwind CSS 4"),
                ("UI Components", "shadcn/ui library"),
                ("Animations", "Framer Motion"),
                ("Code", "Syntax highlighting"),
                ("Diagrams", "Mermaid integration"),
                ("Routing", "Wouter for navigation"),
            ]),
            tech_stack: tech_stack(&[
                ("Frontend", &["React 19", "TypeScript", "Tailwind CSS 4", "shadcn/ui"]),
                ("Tooling", &["Vite", "pnpm", "ESLint", "Prettier"]),
                ("Libraries", &["Wouter", "Framer Motion", "Mermaid"]),
                ("Deployment", &["GitHub Pages", "GitHub Actions"]),
            ]),
        },
        implementation: phases(&[
            (
                "Foundation",
                "Weeks 1-2",
                "Establish project structure, design system, and component library using React \
                 and Tailwind.",
            ),
            (
                "Tutorial System",
                "Weeks 3-5",
                "Develop tutorial content structure and rendering system with markdown support.",
            ),
            (
                "Interactive Features",
                "Weeks 6-7",
                "Build interactive playground and architecture builder with Mermaid integration.",
            ),
            (
                "Polish",
                "Weeks 8-9",
                "Optimize performance, add animations, and refine UX for all device sizes.",
            ),
        ]),
        results: strings(&[
            "6+ comprehensive tutorials delivered",
            "98+ Lighthouse performance score",
            "Interactive playground and quiz system",
            "Fully responsive mobile-first design",
        ]),
    }
}

fn azure_smart_guardian() -> ProjectDetail {
    ProjectDetail {
        title: "Azure Smart Guardian".to_string(),
        subtitle: "Edge-to-Cloud IoT Security & Environmental Monitoring".to_string(),
        description: "A sophisticated IoT ecosystem leveraging Raspberry Pi 5 as an Edge Gateway \
                      and ESP32 nodes for remote sensing and surveillance. The system integrates \
                      with Azure IoT Hub for real-time telemetry, automated alerting, and \
                      cloud-based image storage."
            .to_string(),
        stats: stats(&[
            ("Latency", "<200ms"),
            ("Connectivity", "MQTT/TLS"),
            ("Storage", "Azure Blob"),
        ]),
        problem_statement: "Traditional security systems often lack integrated environmental \
                            monitoring and are difficult to scale across remote locations. \
                            There is a need for a unified platform that combines visual \
                            surveillance with real-time sensor data at the edge."
            .to_string(),
        requirements: strings(&[
            "Real-time temperature and humidity monitoring",
            "Motion-triggered image capture and cloud upload",
            "Edge-based data processing to reduce cloud costs",
            "Secure, encrypted communication between nodes and gateway",
        ]),
        solution: Solution {
            architecture: architecture(&[
                ("Edge Node", "ESP32-WROVER-E, DHT11, Camera"),
                ("Gateway", "Raspberry Pi 5, Azure IoT Edge"),
                ("Communication", "MQTT over TLS 1.3"),
                ("Cloud Hub", "Azure IoT Hub, Device Provisioning"),
                ("Processing", "Azure Stream Analytics"),
                ("Storage", "Azure Blob Storage (Images)"),
                ("Alerting", "Azure Logic Apps (Email/SMS)"),
            ]),
            tech_stack: tech_stack(&[
                (
                    "Hardware",
                    &["Raspberry Pi 5", "ESP32-WROVER-E", "DHT11 Sensor", "OV2640 Camera"],
                ),
                (
                    "Edge Software",
                    &["Python", "C++ (Arduino)", "Docker", "Azure IoT Edge Runtime"],
                ),
                (
                    "Cloud Services",
                    &["Azure IoT Hub", "Stream Analytics", "Blob Storage", "Logic Apps"],
                ),
                ("Protocols", &["MQTT", "HTTPS", "AMQP", "WebSockets"]),
            ]),
        },
        implementation: phases(&[
            (
                "Edge Development",
                "Weeks 1-3",
                "Develop ESP32 firmware for sensor data acquisition and camera integration. \
                 Implement MQTT client with TLS.",
            ),
            (
                "Gateway Setup",
                "Weeks 4-6",
                "Configure Raspberry Pi 5 with Azure IoT Edge. Implement custom modules for \
                 local data filtering and image buffering.",
            ),
            (
                "Cloud Integration",
                "Weeks 7-9",
                "Set up Azure IoT Hub, Stream Analytics jobs, and Blob Storage containers. \
                 Configure Logic Apps for automated alerting.",
            ),
            (
                "Testing & Optimization",
                "Weeks 10-12",
                "Perform end-to-end latency testing, optimize power consumption for edge nodes, \
                 and refine motion detection algorithms.",
            ),
        ]),
        results: strings(&[
            "Real-time environmental monitoring with <200ms latency",
            "Automated security alerts with image attachments",
            "30% reduction in cloud bandwidth via edge filtering",
            "Scalable architecture supporting 100+ remote nodes",
        ]),
    }
}
