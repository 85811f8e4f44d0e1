use anyhow::Result;
use catalog::{
    CatalogError, CatalogService, CreateCourseCommand, CreateInstanceCommand, ErrorKind,
    InstanceFilter, query,
};
use clap::{Parser, Subcommand};
use client::{ClientConfig, HttpStore, render};
use log::info;
use models::{CourseId, InstanceKey, Semester, Year};
use std::process::ExitCode;

/// Manage courses, their prerequisites and their scheduled instances
#[derive(Debug, Parser)]
#[command(name = "catalog", version)]
struct Cli {
    /// Base URL of the catalog API (defaults to CATALOG_API_URL or http://localhost:8080/api)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Course catalog
    #[command(subcommand)]
    Courses(CourseCommand),
    /// Scheduled course instances
    #[command(subcommand)]
    Instances(InstanceCommand),
}

#[derive(Debug, Subcommand)]
enum CourseCommand {
    /// List every course with its prerequisites and dependents
    List {
        /// Only courses of this department, e.g. CS
        #[arg(long)]
        department: Option<String>,
    },
    /// Show one course
    Show { course_id: String },
    /// Create a course
    Add {
        course_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Prerequisite course ID, repeatable
        #[arg(long = "prereq")]
        prerequisites: Vec<String>,
    },
    /// Delete a course that no other course requires
    Rm { course_id: String },
}

#[derive(Debug, Subcommand)]
enum InstanceCommand {
    /// List instances grouped by year and semester, most recent first
    List {
        #[arg(long)]
        year: Option<Year>,
        /// 1 (Spring) or 2 (Fall)
        #[arg(long)]
        semester: Option<Semester>,
    },
    /// Show one instance
    Show {
        year: Year,
        semester: Semester,
        course_id: CourseId,
    },
    /// Schedule a course for a year and semester
    Add {
        course_id: String,
        #[arg(long)]
        year: Option<Year>,
        #[arg(long)]
        semester: Option<Semester>,
    },
    /// Remove a scheduled instance
    Rm {
        year: Year,
        semester: Semester,
        course_id: CourseId,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }

    let store = HttpStore::new(&config)?;
    info!("Using catalog API at {}", store.base_url());
    let mut service = CatalogService::connect(store).await?;

    match cli.command {
        Command::Courses(CourseCommand::List { department }) => {
            print!(
                "{}",
                render::courses(service.catalog(), department.as_deref())
            );
        }
        Command::Courses(CourseCommand::Show { course_id }) => {
            let course = service.get_course(&course_id).await?;
            print!("{}", render::course(&course));
        }
        Command::Courses(CourseCommand::Add {
            course_id,
            title,
            description,
            prerequisites,
        }) => {
            let command = CreateCourseCommand::new(course_id, title, description)
                .with_prerequisites(prerequisites);
            let course = service.create_course(command).await?;
            println!("Course {} created successfully", course.course_id);
        }
        Command::Courses(CourseCommand::Rm { course_id }) => {
            service.delete_course(&course_id).await?;
            println!("Course {} deleted successfully", course_id.to_uppercase());
        }
        Command::Instances(InstanceCommand::List { year, semester }) => {
            let filter = InstanceFilter::new(year, semester);
            let instances = service.list_instances(&filter).await?;
            let groups = query::group_by_period(&instances);
            print!("{}", render::schedule(&groups, !filter.is_empty()));
            print!(
                "{}",
                render::year_options(&query::unique_years(service.catalog().instances()))
            );
        }
        Command::Instances(InstanceCommand::Show {
            year,
            semester,
            course_id,
        }) => {
            let key = InstanceKey::new(course_id, year, semester);
            let instance = service.get_instance(&key).await?;
            print!("{}", render::instance(&instance));
        }
        Command::Instances(InstanceCommand::Add {
            course_id,
            year,
            semester,
        }) => {
            let command = CreateInstanceCommand {
                course_id,
                year,
                semester,
            };
            let instance = match service.create_instance(command).await {
                Ok(instance) => instance,
                Err(e) if e.kind() == ErrorKind::RequiredField => {
                    eprint!("{}", render::period_choices());
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };
            println!("Course instance {} created successfully", instance.key());
        }
        Command::Instances(InstanceCommand::Rm {
            year,
            semester,
            course_id,
        }) => {
            let key = InstanceKey::new(course_id, year, semester);
            service.delete_instance(&key).await?;
            println!("Course instance {key} deleted successfully");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CatalogError>() {
                Some(err) => eprintln!("{}: {}", err.kind(), err),
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
