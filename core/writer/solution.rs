use crate::ids::format_guid;
use crate::model::Solution;
use crate::settings::SolutionSettings;

/// Project type GUID for Visual C++ projects.
pub const CPP_PROJECT_TYPE_GUID: &str = "{8bc9ceb8-8b4a-11d0-8d11-00a0c91bc942}";

const LINE_END: &str = "\r\n";

struct SolutionText {
    text: String,
    indent: usize,
}

impl SolutionText {
    fn line(&mut self, content: impl AsRef<str>) {
        for _ in 0..self.indent {
            self.text.push('\t');
        }
        self.text.push_str(content.as_ref());
        self.text.push_str(LINE_END);
    }

    fn section(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.indent += 1;
        body(self);
        self.indent -= 1;
        self.line("EndGlobalSection");
    }
}

pub fn render_solution(solution: &Solution, settings: &SolutionSettings) -> String {
    let mut out = SolutionText {
        text: String::new(),
        indent: 0,
    };

    out.line(format!(
        "Microsoft Visual Studio Solution File, Format Version {}",
        settings.format_version
    ));
    out.line(format!("VisualStudioVersion = {}", settings.visual_studio_version));
    out.line(format!(
        "MinimumVisualStudioVersion = {}",
        settings.minimum_visual_studio_version
    ));

    for project in &solution.projects {
        out.line(format!(
            "Project(\"{}\") = \"{}\", \"{}\\{}.vcxproj\", \"{}\"",
            CPP_PROJECT_TYPE_GUID,
            project.name,
            project.name,
            project.name,
            format_guid(&project.id)
        ));
        out.line("EndProject");
    }

    out.line("Global");
    out.indent += 1;

    out.section(
        "GlobalSection(SolutionConfigurationPlatforms) = preSolution",
        |out| {
            for variant in &solution.variants {
                out.line(format!("{} = {}", variant, variant));
            }
        },
    );

    out.section(
        "GlobalSection(ProjectConfigurationPlatforms) = postSolution",
        |out| {
            for project in &solution.projects {
                let guid = format_guid(&project.id);
                for variant in &solution.variants {
                    out.line(format!("{}.{}.ActiveCfg = {}", guid, variant, variant));
                    if project.builds_variant(variant) {
                        out.line(format!("{}.{}.Build.0 = {}", guid, variant, variant));
                    }
                }
            }
        },
    );

    out.section("GlobalSection(SolutionProperties) = preSolution", |out| {
        out.line("HideSolutionNode = FALSE");
    });

    out.indent -= 1;
    out.line("EndGlobal");
    out.text
}
