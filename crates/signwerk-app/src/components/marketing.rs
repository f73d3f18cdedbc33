// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Static marketing content: navigation bar, hero, industry pitch and trust
// badges. None of the claims in this copy are backed by code.

use dioxus::prelude::*;

use crate::Route;

const GRADIENT: &str = "linear-gradient(135deg, #1e40af 0%, #7c3aed 100%)";

struct Industry {
    anchor: &'static str,
    title: &'static str,
    description: &'static str,
    features: [&'static str; 5],
}

const INDUSTRIES: [Industry; 4] = [
    Industry {
        anchor: "legal",
        title: "Legal",
        description: "Streamline legal workflows with clause libraries, case bundles, and notarization support",
        features: [
            "Clause libraries & templates",
            "Case bundle management",
            "Notarization support",
            "Court-ready audit trails",
            "Legal compliance tracking",
        ],
    },
    Industry {
        anchor: "hr",
        title: "Human Resources",
        description: "Automate HR processes from onboarding to exit documentation with bulk operations",
        features: [
            "Bulk offer letter sending",
            "Onboarding automation",
            "NDA & contract management",
            "Exit documentation",
            "HRMS integrations",
        ],
    },
    Industry {
        anchor: "realestate",
        title: "Real Estate",
        description: "Manage property transactions with lease agreements, sales contracts, and KYC integration",
        features: [
            "Lease agreement automation",
            "Sales contract workflows",
            "Digital stamping",
            "KYC document processing",
            "Property transaction tracking",
        ],
    },
    Industry {
        anchor: "fintech",
        title: "Fintech",
        description: "Ensure compliance with loan agreements, KYC processes, and regulatory requirements",
        features: [
            "Loan agreement automation",
            "KYC document workflows",
            "RBI compliance modules",
            "GDPR compliance tools",
            "Financial audit trails",
        ],
    },
];

/// (value, label, description)
const METRICS: [(&str, &str, &str); 4] = [
    ("50K+", "Active Users", "Trusted by professionals worldwide"),
    ("2M+", "Documents Signed", "Legally binding signatures processed"),
    ("99.99%", "Uptime SLA", "Enterprise-grade reliability"),
    ("45+", "Countries", "Global compliance coverage"),
];

/// (title, description)
const CERTIFICATIONS: [(&str, &str); 4] = [
    ("SOC 2 Type II", "Certified for security controls"),
    ("ISO 27001", "Information security standard"),
    ("eIDAS Compliant", "EU digital signature regulation"),
    ("ESIGN Act", "US electronic signature law"),
];

const SECURITY_POINTS: [(&str, &str); 3] = [
    (
        "AES-256 Encryption",
        "End-to-end encryption for all documents and communications, ensuring your data remains private and secure.",
    ),
    (
        "Blockchain Validation",
        "Optional blockchain timestamping provides immutable proof of document integrity and signature authenticity.",
    ),
    (
        "Tamper-Proof Audit Trails",
        "Complete audit logs with digital forensics capability for legal compliance and dispute resolution.",
    ),
];

#[component]
pub fn Navigation() -> Element {
    rsx! {
        nav {
            style: "display: flex; align-items: center; justify-content: space-between; padding: 12px 24px; border-bottom: 1px solid #e5e7eb; background: rgba(255,255,255,0.95);",
            Link { to: Route::Home {},
                style: "font-size: 22px; font-weight: 700; text-decoration: none; color: #1e40af;",
                "Signwerk"
            }
            div { style: "display: flex; gap: 24px; font-size: 15px;",
                NavAnchor { href: "#industries", label: "Industries" }
                NavAnchor { href: "#upload", label: "Features" }
                NavAnchor { href: "#security", label: "Security" }
                NavAnchor { href: "#security", label: "Pricing" }
            }
            div { style: "display: flex; gap: 12px; align-items: center;",
                Link { to: Route::Settings {},
                    style: "color: #334155; text-decoration: none; font-size: 15px;",
                    "Settings"
                }
                a { href: "#upload",
                    style: "padding: 8px 16px; border-radius: 8px; background: #1e40af; color: white; text-decoration: none; font-size: 15px;",
                    "Get Started"
                }
            }
        }
    }
}

#[component]
fn NavAnchor(href: &'static str, label: &'static str) -> Element {
    rsx! {
        a { href: href,
            style: "color: #334155; text-decoration: none;",
            "{label}"
        }
    }
}

#[component]
pub fn Hero() -> Element {
    rsx! {
        section {
            style: "padding: 96px 24px; text-align: center; color: white; background: {GRADIENT};",
            div { style: "display: inline-block; margin-bottom: 24px; padding: 8px 16px; border-radius: 999px; border: 1px solid rgba(255,255,255,0.2); background: rgba(255,255,255,0.1); font-size: 14px;",
                "Enterprise-Grade Security & Compliance"
            }
            h1 { style: "font-size: 56px; margin: 0 0 24px 0; line-height: 1.1;",
                "Document Management"
                br {}
                span { style: "opacity: 0.85;", "Reimagined" }
            }
            p { style: "font-size: 20px; max-width: 760px; margin: 0 auto 32px auto; opacity: 0.9;",
                "The modern alternative to DocuSign and PandaDoc. Built for Legal, HR, Real Estate, and Fintech with industry-specific workflows and legally binding e-signatures."
            }
            div { style: "display: flex; flex-wrap: wrap; justify-content: center; gap: 12px; margin-bottom: 40px;",
                for pill in ["eIDAS & ESIGN Compliant", "AES-256 Encryption", "Blockchain Validation"] {
                    span {
                        style: "padding: 8px 16px; border-radius: 999px; border: 1px solid rgba(255,255,255,0.2); background: rgba(255,255,255,0.1); font-size: 14px;",
                        "✓ {pill}"
                    }
                }
            }
            div { style: "display: flex; justify-content: center; gap: 16px; margin-bottom: 48px;",
                a { href: "#upload",
                    style: "padding: 14px 32px; border-radius: 8px; background: white; color: #1e40af; font-size: 18px; text-decoration: none;",
                    "Start Free Trial →"
                }
                a { href: "#industries",
                    style: "padding: 14px 32px; border-radius: 8px; border: 1px solid rgba(255,255,255,0.3); color: white; font-size: 18px; text-decoration: none;",
                    "Book Demo"
                }
            }
            div { style: "display: flex; justify-content: center; gap: 32px; opacity: 0.8; font-size: 14px;",
                for name in ["Legal", "HR", "Real Estate", "Fintech"] {
                    span { "{name}" }
                }
            }
        }
    }
}

#[component]
pub fn IndustrySection() -> Element {
    rsx! {
        section { id: "industries",
            style: "padding: 80px 24px; background: linear-gradient(to bottom, #ffffff, #f8fafc);",
            SectionHeading {
                badge: "Industry-Specific Solutions",
                title: "Built for Your Industry",
                subtitle: "Tailored workflows and compliance features designed specifically for Legal, HR, Real Estate, and Fintech sectors",
            }
            div { style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(380px, 1fr)); gap: 32px; max-width: 1100px; margin: 0 auto;",
                for industry in INDUSTRIES.iter() {
                    div { key: "{industry.anchor}",
                        style: "padding: 24px; border: 2px solid #e5e7eb; border-radius: 12px; background: white;",
                        h3 { style: "font-size: 24px; margin: 0 0 8px 0;", "{industry.title}" }
                        p { style: "color: #64748b; margin: 0 0 16px 0;", "{industry.description}" }
                        for feature in industry.features {
                            div { style: "padding: 6px 0; color: #334155;",
                                span { style: "color: #059669; margin-right: 8px;", "✓" }
                                "{feature}"
                            }
                        }
                        div { style: "margin-top: 20px; padding-top: 16px; border-top: 1px solid #e5e7eb; color: #1e40af; font-weight: 500;",
                            "Learn More →"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn TrustSection() -> Element {
    rsx! {
        section { id: "security",
            style: "padding: 80px 24px; background: linear-gradient(to bottom, #f8fafc, #ffffff);",
            SectionHeading {
                badge: "Enterprise-Grade Security",
                title: "Built for Maximum Trust",
                subtitle: "Your documents are protected with military-grade encryption, blockchain validation, and comprehensive compliance frameworks",
            }
            div { style: "display: grid; grid-template-columns: repeat(4, 1fr); gap: 24px; max-width: 1100px; margin: 0 auto 64px auto;",
                for (value, label, description) in METRICS {
                    div { key: "{label}",
                        style: "padding: 24px; text-align: center; border: 1px solid #e5e7eb; border-radius: 12px;",
                        div { style: "font-size: 30px; font-weight: 700; color: #1e40af; margin-bottom: 8px;", "{value}" }
                        div { style: "font-weight: 600; margin-bottom: 4px;", "{label}" }
                        div { style: "font-size: 14px; color: #64748b;", "{description}" }
                    }
                }
            }
            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 48px; max-width: 1100px; margin: 0 auto; align-items: center;",
                div {
                    h3 { style: "font-size: 30px; margin: 0 0 24px 0;", "Uncompromising Security" }
                    for (title, text) in SECURITY_POINTS {
                        div { key: "{title}", style: "margin-bottom: 20px;",
                            h4 { style: "margin: 0 0 8px 0;", "{title}" }
                            p { style: "margin: 0; color: #64748b;", "{text}" }
                        }
                    }
                }
                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px;",
                    for (title, text) in CERTIFICATIONS {
                        div { key: "{title}",
                            style: "padding: 24px; text-align: center; border: 1px solid #e5e7eb; border-radius: 12px;",
                            h4 { style: "margin: 0 0 8px 0;", "{title}" }
                            p { style: "margin: 0; font-size: 14px; color: #64748b;", "{text}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SectionHeading(badge: &'static str, title: &'static str, subtitle: &'static str) -> Element {
    rsx! {
        div { style: "text-align: center; margin-bottom: 56px;",
            span { style: "display: inline-block; margin-bottom: 16px; padding: 8px 16px; border-radius: 999px; background: rgba(30,64,175,0.1); color: #1e40af; font-size: 14px; font-weight: 500;",
                "{badge}"
            }
            h2 { style: "font-size: 42px; margin: 0 0 16px 0;", "{title}" }
            p { style: "font-size: 20px; color: #64748b; max-width: 760px; margin: 0 auto;", "{subtitle}" }
        }
    }
}
