//! Service type catalog.
//!
//! One metadata record per service kind replaces per-service wrapper
//! components: everything a renderer needs to decorate a generic box
//! (display name, category, icon) is looked up here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    // Compute
    Lambda,
    Ec2,
    Ecs,
    Fargate,
    // Database
    #[serde(rename = "dynamodb")]
    DynamoDb,
    Rds,
    Aurora,
    Elasticache,
    // Networking
    ApiGateway,
    Alb,
    Nlb,
    Vpc,
    Cloudfront,
    Route53,
    // Storage
    S3,
    Efs,
    Ebs,
    // Messaging
    Sqs,
    Sns,
    Eventbridge,
    Kinesis,
    StepFunctions,
    // Security
    Waf,
    Shield,
    SecretsManager,
    Kms,
    Cognito,
    // Monitoring
    Cloudwatch,
    Xray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Compute,
    Database,
    Networking,
    Storage,
    Messaging,
    Security,
    Monitoring,
}

impl ServiceCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceCategory::Compute => "compute",
            ServiceCategory::Database => "database",
            ServiceCategory::Networking => "networking",
            ServiceCategory::Storage => "storage",
            ServiceCategory::Messaging => "messaging",
            ServiceCategory::Security => "security",
            ServiceCategory::Monitoring => "monitoring",
        }
    }
}

/// Static metadata for one service kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub category: ServiceCategory,
    pub docs_path: &'static str,
}

impl ServiceKind {
    pub fn info(self) -> ServiceInfo {
        use ServiceCategory::*;
        match self {
            ServiceKind::Lambda => ServiceInfo {
                name: "AWS Lambda",
                description: "Serverless compute service that runs code in response to events",
                category: Compute,
                docs_path: "/lambda",
            },
            ServiceKind::Ec2 => ServiceInfo {
                name: "Amazon EC2",
                description: "Virtual servers with full control over computing resources",
                category: Compute,
                docs_path: "/ec2",
            },
            ServiceKind::Ecs => ServiceInfo {
                name: "Amazon ECS",
                description: "Fully managed container orchestration service",
                category: Compute,
                docs_path: "/ecs",
            },
            ServiceKind::Fargate => ServiceInfo {
                name: "AWS Fargate",
                description: "Serverless compute engine for containers",
                category: Compute,
                docs_path: "/fargate",
            },
            ServiceKind::DynamoDb => ServiceInfo {
                name: "Amazon DynamoDB",
                description: "Fast, flexible NoSQL database service for any scale",
                category: Database,
                docs_path: "/dynamodb",
            },
            ServiceKind::Rds => ServiceInfo {
                name: "Amazon RDS",
                description: "Managed relational database service",
                category: Database,
                docs_path: "/rds",
            },
            ServiceKind::Aurora => ServiceInfo {
                name: "Amazon Aurora",
                description: "MySQL and PostgreSQL-compatible relational database",
                category: Database,
                docs_path: "/aurora",
            },
            ServiceKind::Elasticache => ServiceInfo {
                name: "Amazon ElastiCache",
                description: "In-memory caching service for Redis and Memcached",
                category: Database,
                docs_path: "/elasticache",
            },
            ServiceKind::ApiGateway => ServiceInfo {
                name: "Amazon API Gateway",
                description: "Managed service for creating, publishing and managing APIs",
                category: Networking,
                docs_path: "/apigateway",
            },
            ServiceKind::Alb => ServiceInfo {
                name: "Application Load Balancer",
                description: "Layer 7 load balancer for HTTP/HTTPS traffic",
                category: Networking,
                docs_path: "/elasticloadbalancing",
            },
            ServiceKind::Nlb => ServiceInfo {
                name: "Network Load Balancer",
                description: "Layer 4 load balancer for TCP/UDP traffic",
                category: Networking,
                docs_path: "/elasticloadbalancing",
            },
            ServiceKind::Vpc => ServiceInfo {
                name: "Amazon VPC",
                description: "Isolated cloud resources in a virtual network",
                category: Networking,
                docs_path: "/vpc",
            },
            ServiceKind::Cloudfront => ServiceInfo {
                name: "Amazon CloudFront",
                description: "Fast content delivery network (CDN) service",
                category: Networking,
                docs_path: "/cloudfront",
            },
            ServiceKind::Route53 => ServiceInfo {
                name: "Amazon Route 53",
                description: "Scalable domain name system (DNS) web service",
                category: Networking,
                docs_path: "/route53",
            },
            ServiceKind::S3 => ServiceInfo {
                name: "Amazon S3",
                description: "Object storage with industry-leading scalability and durability",
                category: Storage,
                docs_path: "/s3",
            },
            ServiceKind::Efs => ServiceInfo {
                name: "Amazon EFS",
                description: "Scalable, elastic file storage for Linux workloads",
                category: Storage,
                docs_path: "/efs",
            },
            ServiceKind::Ebs => ServiceInfo {
                name: "Amazon EBS",
                description: "Block storage volumes for use with EC2 instances",
                category: Storage,
                docs_path: "/ebs",
            },
            ServiceKind::Sqs => ServiceInfo {
                name: "Amazon SQS",
                description: "Fully managed message queuing service",
                category: Messaging,
                docs_path: "/sqs",
            },
            ServiceKind::Sns => ServiceInfo {
                name: "Amazon SNS",
                description: "Fully managed pub/sub messaging service",
                category: Messaging,
                docs_path: "/sns",
            },
            ServiceKind::Eventbridge => ServiceInfo {
                name: "Amazon EventBridge",
                description: "Serverless event bus for application integration",
                category: Messaging,
                docs_path: "/eventbridge",
            },
            ServiceKind::Kinesis => ServiceInfo {
                name: "Amazon Kinesis",
                description: "Real-time data streaming at scale",
                category: Messaging,
                docs_path: "/kinesis",
            },
            ServiceKind::StepFunctions => ServiceInfo {
                name: "AWS Step Functions",
                description: "Visual workflow orchestration for distributed applications",
                category: Messaging,
                docs_path: "/step-functions",
            },
            ServiceKind::Waf => ServiceInfo {
                name: "AWS WAF",
                description: "Web application firewall for common exploits",
                category: Security,
                docs_path: "/waf",
            },
            ServiceKind::Shield => ServiceInfo {
                name: "AWS Shield",
                description: "Managed DDoS protection",
                category: Security,
                docs_path: "/shield",
            },
            ServiceKind::SecretsManager => ServiceInfo {
                name: "AWS Secrets Manager",
                description: "Rotate, manage and retrieve secrets",
                category: Security,
                docs_path: "/secretsmanager",
            },
            ServiceKind::Kms => ServiceInfo {
                name: "AWS KMS",
                description: "Managed creation and control of encryption keys",
                category: Security,
                docs_path: "/kms",
            },
            ServiceKind::Cognito => ServiceInfo {
                name: "Amazon Cognito",
                description: "Identity management for web and mobile apps",
                category: Security,
                docs_path: "/cognito",
            },
            ServiceKind::Cloudwatch => ServiceInfo {
                name: "Amazon CloudWatch",
                description: "Observability of resources and applications",
                category: Monitoring,
                docs_path: "/cloudwatch",
            },
            ServiceKind::Xray => ServiceInfo {
                name: "AWS X-Ray",
                description: "Distributed tracing for application analysis",
                category: Monitoring,
                docs_path: "/xray",
            },
        }
    }

    pub fn category(self) -> ServiceCategory {
        self.info().category
    }

    /// Default icon id; the render layer resolves it against its built-in
    /// icon set and falls back to `unknown` when missing.
    pub fn icon_id(self) -> &'static str {
        self.category().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_deserialize_from_kebab_case() {
        let k: ServiceKind = serde_json::from_str(r#""api-gateway""#).unwrap();
        assert_eq!(k, ServiceKind::ApiGateway);
        let k: ServiceKind = serde_json::from_str(r#""dynamodb""#).unwrap();
        assert_eq!(k, ServiceKind::DynamoDb);
        let k: ServiceKind = serde_json::from_str(r#""step-functions""#).unwrap();
        assert_eq!(k, ServiceKind::StepFunctions);
    }

    #[test]
    fn every_kind_has_metadata() {
        // Spot-check the table; a missing arm would not compile.
        assert_eq!(ServiceKind::Lambda.info().category, ServiceCategory::Compute);
        assert_eq!(ServiceKind::Sqs.category(), ServiceCategory::Messaging);
        assert_eq!(ServiceKind::Xray.icon_id(), "monitoring");
    }
}
